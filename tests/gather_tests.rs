// Gather strategy tests - hunts, harvests and dead-end codes
mod common;

use artifacts_crew::{GatherStrategy, OrderSet};
use common::{test_catalog, MockActions};
use tempfile::TempDir;
use tokio;

fn banned_set(dir: &TempDir) -> OrderSet {
    OrderSet::open_fresh(&dir.path().join("banned.json").to_string_lossy())
}

#[tokio::test]
async fn test_task_reward_items_are_banned() {
    let actions = MockActions::new();
    let catalog = test_catalog();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut banned = banned_set(&dir);

    let gather = GatherStrategy::new(&actions, &catalog);
    let got = gather
        .obtain("magic_stone", 1, false, &mut banned)
        .await
        .expect("Obtain failed");

    assert!(!got, "Task rewards cannot be gathered");
    assert!(banned.contains("magic_stone"), "The code should be banned for the session");
    assert!(actions.calls().is_empty(), "No trip should be attempted");

    println!("✅ Task reward test passed");
}

#[tokio::test]
async fn test_unknown_codes_are_banned() {
    let actions = MockActions::new();
    let catalog = test_catalog();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut banned = banned_set(&dir);

    let gather = GatherStrategy::new(&actions, &catalog);
    let got = gather
        .obtain("mystery_meat", 1, false, &mut banned)
        .await
        .expect("Obtain failed");

    assert!(!got);
    assert!(banned.contains("mystery_meat"));

    println!("✅ Unknown code test passed");
}

#[tokio::test]
async fn test_monster_loot_triggers_a_hunt() {
    let actions = MockActions::new();
    let catalog = test_catalog();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut banned = banned_set(&dir);

    let gather = GatherStrategy::new(&actions, &catalog);
    let got = gather
        .obtain("raw_hide", 3, false, &mut banned)
        .await
        .expect("Obtain failed");

    assert!(got, "A winning hunt should deliver");
    assert!(actions.saw_call("gear_up(wolf)"), "Should gear up for the wolf first");
    assert!(actions.saw_call("move(5,5)"), "Should walk to the wolf");
    assert!(actions.saw_call("fight_for_drop(raw_hide,3)"));
    assert!(banned.is_empty());

    println!("✅ Hunt test passed");
}

#[tokio::test]
async fn test_lost_hunt_bans_the_code() {
    let actions = MockActions::new().failing_fights();
    let catalog = test_catalog();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut banned = banned_set(&dir);

    let gather = GatherStrategy::new(&actions, &catalog);
    let got = gather
        .obtain("raw_hide", 3, false, &mut banned)
        .await
        .expect("Obtain failed");

    assert!(!got, "A lost hunt comes home empty");
    assert!(banned.contains("raw_hide"), "The unwinnable drop should be banned");

    println!("✅ Lost hunt test passed");
}

#[tokio::test]
async fn test_harvest_equips_the_banked_tool() {
    let actions = MockActions::new().with_bank("iron_pickaxe", 1);
    let catalog = test_catalog();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut banned = banned_set(&dir);

    let gather = GatherStrategy::new(&actions, &catalog);
    let got = gather
        .obtain("copper_ore", 8, false, &mut banned)
        .await
        .expect("Obtain failed");

    assert!(got);
    assert!(actions.saw_call("withdraw(iron_pickaxe,1)"), "The pickaxe should come out of the bank");
    assert!(actions.saw_call("equip(iron_pickaxe,weapon)"));
    assert!(actions.saw_call("move(2,0)"), "Should walk to the copper rocks");
    assert!(actions.saw_call("gather(8)"));
    assert!(actions.saw_call("deposit_all"), "The haul should be banked");

    // A second trip finds the pickaxe already in hand
    gather
        .obtain("copper_ore", 8, false, &mut banned)
        .await
        .expect("Obtain failed");
    let withdrawals = actions
        .calls()
        .iter()
        .filter(|c| c.as_str() == "withdraw(iron_pickaxe,1)")
        .count();
    assert_eq!(withdrawals, 1, "The tool should only be fetched once");

    println!("✅ Tool equip test passed");
}

#[tokio::test]
async fn test_keep_haul_skips_the_deposit() {
    let actions = MockActions::new();
    let catalog = test_catalog();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut banned = banned_set(&dir);

    let gather = GatherStrategy::new(&actions, &catalog);
    let got = gather
        .obtain("ash_wood", 4, true, &mut banned)
        .await
        .expect("Obtain failed");

    assert!(got);
    assert!(actions.saw_call("gather(4)"));
    assert!(
        !actions.saw_call("deposit_all"),
        "A haul kept for crafting should stay in the pack"
    );

    println!("✅ Keep-haul test passed");
}

#[tokio::test]
async fn test_short_gather_is_not_a_ban() {
    let actions = MockActions::new().failing_gather();
    let catalog = test_catalog();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut banned = banned_set(&dir);

    let gather = GatherStrategy::new(&actions, &catalog);
    let got = gather
        .obtain("copper_ore", 8, false, &mut banned)
        .await
        .expect("Obtain failed");

    assert!(!got, "A cut-short trip reports less than the full quantity");
    assert!(
        banned.is_empty(),
        "A full pack is no reason to give up on the code"
    );

    println!("✅ Short gather test passed");
}

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use crate::models::*;
use crate::{API_BASE_URL, v_debug, v_info};

// Status codes the server uses for expected conditions
const STATUS_ALREADY_AT_DESTINATION: u16 = 490;
const STATUS_COOLDOWN_ACTIVE: u16 = 499;

const MAX_COOLDOWN_RETRIES: u32 = 3;
const FALLBACK_RETRY_SECONDS: f64 = 5.0;

#[derive(Clone)]
pub struct ArtifactsClient {
    client: reqwest::Client,
    pub character: String,
}

impl ArtifactsClient {
    pub fn new(token: String, character: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap();

        ArtifactsClient {
            client,
            character: character.to_string(),
        }
    }

    fn action_url(&self, action: &str) -> String {
        format!("{}/my/{}/action/{}", API_BASE_URL, self.character, action)
    }

    /// Sleep out the cooldown the server attached to an action response.
    async fn wait_for_cooldown(&self, cooldown: &Cooldown) {
        if cooldown.remaining_seconds > 0.0 {
            v_debug!("⏳ Cooldown: {:.1}s", cooldown.remaining_seconds);
            tokio::time::sleep(std::time::Duration::from_secs_f64(cooldown.remaining_seconds))
                .await;
        }
    }

    /// POST an action, retrying while the previous cooldown is still running.
    async fn post_action<T: DeserializeOwned>(
        &self,
        action: &str,
        body: serde_json::Value,
    ) -> Result<T, Box<dyn std::error::Error>> {
        let url = self.action_url(action);

        for attempt in 0..MAX_COOLDOWN_RETRIES {
            let response = self.client.post(&url).json(&body).send().await?;
            let status = response.status().as_u16();

            if response.status().is_success() {
                let parsed: DataResponse<T> = response.json().await?;
                return Ok(parsed.data);
            }

            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read response".to_string());

            if status == STATUS_COOLDOWN_ACTIVE && attempt + 1 < MAX_COOLDOWN_RETRIES {
                let wait = parse_cooldown_message(&error_body).unwrap_or(FALLBACK_RETRY_SECONDS);
                v_info!("⏳ {} still cooling down, retrying in {:.1}s", self.character, wait);
                tokio::time::sleep(std::time::Duration::from_secs_f64(wait)).await;
                continue;
            }

            return Err(format!("{} failed with status {}: {}", action, status, error_body).into());
        }

        Err(format!("{} failed: cooldown never cleared", action).into())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, Box<dyn std::error::Error>> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(format!("GET {} failed with status: {}", url, response.status()).into());
        }

        let parsed: T = response.json().await?;
        Ok(parsed)
    }

    /// Fetch every page of a listing endpoint into one vector.
    async fn get_all_pages<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, Box<dyn std::error::Error>> {
        let mut collected = Vec::new();
        let mut page = 1;

        loop {
            let separator = if path.contains('?') { '&' } else { '?' };
            let url = format!("{}{}{}page={}&size=100", API_BASE_URL, path, separator, page);
            let response: PagedResponse<T> = self.get_json(&url).await?;
            let pages = response.pages;
            collected.extend(response.data);
            if page >= pages {
                break;
            }
            page += 1;
        }

        Ok(collected)
    }

    // Character state

    pub async fn get_character(&self) -> Result<Character, Box<dyn std::error::Error>> {
        let url = format!("{}/characters/{}", API_BASE_URL, self.character);
        let response: DataResponse<Character> = self.get_json(&url).await?;
        Ok(response.data)
    }

    // Movement

    /// Move to a tile. Returns None when the character is already there.
    pub async fn move_to(
        &self,
        x: i32,
        y: i32,
    ) -> Result<Option<MoveData>, Box<dyn std::error::Error>> {
        let url = self.action_url("move");
        let body = serde_json::json!({"x": x, "y": y});

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status().as_u16();

        if status == STATUS_ALREADY_AT_DESTINATION {
            return Ok(None);
        }

        if !response.status().is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read response".to_string());

            if status == STATUS_COOLDOWN_ACTIVE {
                let wait = parse_cooldown_message(&error_body).unwrap_or(FALLBACK_RETRY_SECONDS);
                tokio::time::sleep(std::time::Duration::from_secs_f64(wait)).await;
                let retried: MoveData = self.post_action("move", body).await?;
                self.wait_for_cooldown(&retried.cooldown).await;
                return Ok(Some(retried));
            }

            return Err(format!("move failed with status {}: {}", status, error_body).into());
        }

        let parsed: DataResponse<MoveData> = response.json().await?;
        self.wait_for_cooldown(&parsed.data.cooldown).await;
        Ok(Some(parsed.data))
    }

    // Combat and gathering

    pub async fn fight(&self) -> Result<FightData, Box<dyn std::error::Error>> {
        let data: FightData = self.post_action("fight", serde_json::json!({})).await?;
        self.wait_for_cooldown(&data.cooldown).await;
        Ok(data)
    }

    pub async fn gather(&self) -> Result<SkillData, Box<dyn std::error::Error>> {
        let data: SkillData = self.post_action("gathering", serde_json::json!({})).await?;
        self.wait_for_cooldown(&data.cooldown).await;
        Ok(data)
    }

    pub async fn rest(&self) -> Result<RestData, Box<dyn std::error::Error>> {
        let data: RestData = self.post_action("rest", serde_json::json!({})).await?;
        self.wait_for_cooldown(&data.cooldown).await;
        Ok(data)
    }

    pub async fn use_item(
        &self,
        code: &str,
        quantity: i32,
    ) -> Result<UseItemData, Box<dyn std::error::Error>> {
        let body = serde_json::json!({"code": code, "quantity": quantity});
        let data: UseItemData = self.post_action("use", body).await?;
        self.wait_for_cooldown(&data.cooldown).await;
        Ok(data)
    }

    // Crafting

    pub async fn craft(
        &self,
        code: &str,
        quantity: i32,
    ) -> Result<SkillData, Box<dyn std::error::Error>> {
        let body = serde_json::json!({"code": code, "quantity": quantity});
        let data: SkillData = self.post_action("crafting", body).await?;
        self.wait_for_cooldown(&data.cooldown).await;
        Ok(data)
    }

    pub async fn recycle(
        &self,
        code: &str,
        quantity: i32,
    ) -> Result<RecycleData, Box<dyn std::error::Error>> {
        let body = serde_json::json!({"code": code, "quantity": quantity});
        let data: RecycleData = self.post_action("recycling", body).await?;
        self.wait_for_cooldown(&data.cooldown).await;
        Ok(data)
    }

    // Equipment

    pub async fn equip(
        &self,
        code: &str,
        slot: &str,
    ) -> Result<EquipData, Box<dyn std::error::Error>> {
        let body = serde_json::json!({"code": code, "slot": slot});
        let data: EquipData = self.post_action("equip", body).await?;
        self.wait_for_cooldown(&data.cooldown).await;
        Ok(data)
    }

    pub async fn unequip(&self, slot: &str) -> Result<EquipData, Box<dyn std::error::Error>> {
        let body = serde_json::json!({"slot": slot});
        let data: EquipData = self.post_action("unequip", body).await?;
        self.wait_for_cooldown(&data.cooldown).await;
        Ok(data)
    }

    // Bank operations

    pub async fn deposit_item(
        &self,
        code: &str,
        quantity: i32,
    ) -> Result<BankTransactionData, Box<dyn std::error::Error>> {
        let body = serde_json::json!({"code": code, "quantity": quantity});
        let data: BankTransactionData = self.post_action("bank/deposit", body).await?;
        self.wait_for_cooldown(&data.cooldown).await;
        Ok(data)
    }

    pub async fn withdraw_item(
        &self,
        code: &str,
        quantity: i32,
    ) -> Result<BankTransactionData, Box<dyn std::error::Error>> {
        let body = serde_json::json!({"code": code, "quantity": quantity});
        let data: BankTransactionData = self.post_action("bank/withdraw", body).await?;
        self.wait_for_cooldown(&data.cooldown).await;
        Ok(data)
    }

    pub async fn get_bank_items(&self) -> Result<Vec<SimpleItem>, Box<dyn std::error::Error>> {
        self.get_all_pages("/my/bank/items").await
    }

    // Task master

    pub async fn accept_new_task(&self) -> Result<TaskData, Box<dyn std::error::Error>> {
        let data: TaskData = self.post_action("task/new", serde_json::json!({})).await?;
        self.wait_for_cooldown(&data.cooldown).await;
        Ok(data)
    }

    pub async fn complete_task(&self) -> Result<TaskRewardData, Box<dyn std::error::Error>> {
        let data: TaskRewardData = self
            .post_action("task/complete", serde_json::json!({}))
            .await?;
        self.wait_for_cooldown(&data.cooldown).await;
        Ok(data)
    }

    pub async fn exchange_task_coins(&self) -> Result<TaskRewardData, Box<dyn std::error::Error>> {
        let data: TaskRewardData = self
            .post_action("task/exchange", serde_json::json!({}))
            .await?;
        self.wait_for_cooldown(&data.cooldown).await;
        Ok(data)
    }

    // World catalog listings, fetched once at startup

    pub async fn get_all_items(&self) -> Result<Vec<Item>, Box<dyn std::error::Error>> {
        self.get_all_pages("/items").await
    }

    pub async fn get_all_monsters(&self) -> Result<Vec<Monster>, Box<dyn std::error::Error>> {
        self.get_all_pages("/monsters").await
    }

    pub async fn get_all_resources(&self) -> Result<Vec<Resource>, Box<dyn std::error::Error>> {
        self.get_all_pages("/resources").await
    }

    pub async fn get_all_maps(&self) -> Result<Vec<MapTile>, Box<dyn std::error::Error>> {
        self.get_all_pages("/maps").await
    }
}

/// Pull the remaining seconds out of a cooldown error body like
/// `{"error": {"code": 499, "message": "... in 12.5 seconds."}}`.
fn parse_cooldown_message(body: &str) -> Option<f64> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value.get("error")?.get("message")?.as_str()?;
    message
        .split(|c: char| !(c.is_ascii_digit() || c == '.'))
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse::<f64>().ok())
        .next()
}

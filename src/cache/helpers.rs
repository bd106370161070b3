//! Domain Helpers
//!
//! Named wrappers over `CacheManager` for the artifacts the generation
//! pipeline recomputes: character reference sets, story analyses, story
//! breakdowns and rendered panel images. Each fixes a prefix, a parameter
//! shape and a TTL.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheManager;
use crate::error::Result;

pub const CHARACTER_REF_PREFIX: &str = "character_ref";
pub const STORY_ANALYSIS_PREFIX: &str = "story_analysis";
pub const STORY_BREAKDOWN_PREFIX: &str = "story_breakdown";
pub const PANEL_IMAGE_PREFIX: &str = "panel_image";

pub const CHARACTER_REF_TTL: Duration = Duration::from_secs(2 * 60 * 60);
pub const STORY_ANALYSIS_TTL: Duration = Duration::from_secs(60 * 60);
pub const STORY_BREAKDOWN_TTL: Duration = Duration::from_secs(60 * 60);
pub const PANEL_IMAGE_TTL: Duration = Duration::from_secs(4 * 60 * 60);

#[derive(Serialize)]
struct CharacterRefParams<'a> {
    characters: &'a [Value],
    setting: &'a str,
    style: &'a str,
}

#[derive(Serialize)]
struct StoryAnalysisParams<'a> {
    story: &'a str,
    style: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoryBreakdownParams<'a> {
    story_analysis: &'a Value,
    style: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PanelImageParams<'a> {
    panel_number: u32,
    description: &'a str,
    characters: &'a [Value],
    style: &'a str,
    image_size: &'a Value,
}

impl CacheManager {
    // == Character References ==
    pub async fn cache_character_refs(
        &self,
        characters: &[Value],
        setting: &str,
        style: &str,
        refs: &Value,
    ) -> Result<()> {
        let params = CharacterRefParams { characters, setting, style };
        self.set(CHARACTER_REF_PREFIX, &params, refs, Some(CHARACTER_REF_TTL))
            .await
    }

    pub async fn get_cached_character_refs(
        &self,
        characters: &[Value],
        setting: &str,
        style: &str,
    ) -> Result<Option<Value>> {
        let params = CharacterRefParams { characters, setting, style };
        self.get(CHARACTER_REF_PREFIX, &params).await
    }

    // == Story Analysis ==
    pub async fn cache_story_analysis(&self, story: &str, style: &str, analysis: &Value) -> Result<()> {
        let params = StoryAnalysisParams { story, style };
        self.set(STORY_ANALYSIS_PREFIX, &params, analysis, Some(STORY_ANALYSIS_TTL))
            .await
    }

    pub async fn get_cached_story_analysis(&self, story: &str, style: &str) -> Result<Option<Value>> {
        let params = StoryAnalysisParams { story, style };
        self.get(STORY_ANALYSIS_PREFIX, &params).await
    }

    // == Story Breakdown ==
    pub async fn cache_story_breakdown(
        &self,
        story_analysis: &Value,
        style: &str,
        breakdown: &Value,
    ) -> Result<()> {
        let params = StoryBreakdownParams { story_analysis, style };
        self.set(STORY_BREAKDOWN_PREFIX, &params, breakdown, Some(STORY_BREAKDOWN_TTL))
            .await
    }

    pub async fn get_cached_story_breakdown(
        &self,
        story_analysis: &Value,
        style: &str,
    ) -> Result<Option<Value>> {
        let params = StoryBreakdownParams { story_analysis, style };
        self.get(STORY_BREAKDOWN_PREFIX, &params).await
    }

    // == Panel Images ==
    /// Stores a generated panel image (URL, data URI or proxy URL).
    pub async fn cache_panel_image(
        &self,
        panel_number: u32,
        description: &str,
        characters: &[Value],
        style: &str,
        image_size: &Value,
        image: &str,
    ) -> Result<()> {
        let params = PanelImageParams {
            panel_number,
            description,
            characters,
            style,
            image_size,
        };
        self.set(PANEL_IMAGE_PREFIX, &params, image, Some(PANEL_IMAGE_TTL))
            .await
    }

    /// Returns the cached panel image, or None if it was never cached or expired.
    ///
    /// A non-string value under the panel key is treated as a miss.
    pub async fn get_cached_panel_image(
        &self,
        panel_number: u32,
        description: &str,
        characters: &[Value],
        style: &str,
        image_size: &Value,
    ) -> Result<Option<String>> {
        let params = PanelImageParams {
            panel_number,
            description,
            characters,
            style,
            image_size,
        };
        self.get_string(PANEL_IMAGE_PREFIX, &params).await
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{build_key, current_timestamp_ms};
    use serde_json::json;

    fn size() -> Value {
        json!({"width": 1024, "height": 576})
    }

    #[tokio::test]
    async fn test_panel_image_round_trip() {
        let cache = CacheManager::default();
        let characters = vec![json!({"name": "Li", "description": "tall, red scarf"})];

        cache
            .cache_panel_image(1, "desc", &characters, "manga", &size(), "IMG_DATA")
            .await
            .unwrap();

        let hit = cache
            .get_cached_panel_image(1, "desc", &characters, "manga", &size())
            .await
            .unwrap();
        assert_eq!(hit.as_deref(), Some("IMG_DATA"));
    }

    #[tokio::test]
    async fn test_panel_image_any_param_change_misses() {
        let cache = CacheManager::default();
        let characters = vec![json!({"name": "Li"})];
        let other_characters = vec![json!({"name": "Mei"})];
        let other_size = json!({"width": 512, "height": 512});

        cache
            .cache_panel_image(1, "desc", &characters, "manga", &size(), "IMG_DATA")
            .await
            .unwrap();

        let misses = [
            cache.get_cached_panel_image(2, "desc", &characters, "manga", &size()).await,
            cache.get_cached_panel_image(1, "other", &characters, "manga", &size()).await,
            cache.get_cached_panel_image(1, "desc", &other_characters, "manga", &size()).await,
            cache.get_cached_panel_image(1, "desc", &characters, "comic", &size()).await,
            cache.get_cached_panel_image(1, "desc", &characters, "manga", &other_size).await,
        ];
        for result in misses {
            assert_eq!(result.unwrap(), None);
        }
        assert_eq!(cache.stats().await.misses, 5);
    }

    #[tokio::test]
    async fn test_panel_image_non_string_value_is_a_miss() {
        let cache = CacheManager::default();
        let characters = vec![json!({"name": "Li"})];
        let params = PanelImageParams {
            panel_number: 1,
            description: "desc",
            characters: &characters,
            style: "manga",
            image_size: &size(),
        };
        cache
            .set(PANEL_IMAGE_PREFIX, &params, &json!({"url": "IMG_DATA"}), None)
            .await
            .unwrap();

        let cached = cache
            .get_cached_panel_image(1, "desc", &characters, "manga", &size())
            .await
            .unwrap();
        assert_eq!(cached, None);

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn test_panel_image_key_matches_generic_params() {
        let params = PanelImageParams {
            panel_number: 1,
            description: "hero enters",
            characters: &[json!({"name": "Li"})],
            style: "manga",
            image_size: &json!({"w": 1024, "h": 576}),
        };
        let literal = json!({
            "style": "manga",
            "panelNumber": 1,
            "imageSize": {"w": 1024, "h": 576},
            "description": "hero enters",
            "characters": [{"name": "Li"}]
        });

        assert_eq!(
            build_key(PANEL_IMAGE_PREFIX, &params).unwrap(),
            build_key(PANEL_IMAGE_PREFIX, &literal).unwrap()
        );
    }

    #[tokio::test]
    async fn test_panel_image_uses_four_hour_ttl() {
        let cache = CacheManager::default();
        let before = current_timestamp_ms();

        cache
            .cache_panel_image(3, "d", &[], "manga", &size(), "url")
            .await
            .unwrap();

        let key = build_key(
            PANEL_IMAGE_PREFIX,
            &PanelImageParams {
                panel_number: 3,
                description: "d",
                characters: &[],
                style: "manga",
                image_size: &size(),
            },
        )
        .unwrap();
        let store = cache.store();
        let store = store.read().await;
        let entry = store.peek(&key).unwrap();
        assert_eq!(entry.expires_at - entry.created_at, PANEL_IMAGE_TTL.as_millis() as u64);
        assert!(entry.created_at >= before);
    }

    #[tokio::test]
    async fn test_story_analysis_round_trip() {
        let cache = CacheManager::default();
        let analysis = json!({"characters": ["Li"], "scenes": 4});

        assert_eq!(cache.get_cached_story_analysis("story", "manga").await.unwrap(), None);
        cache.cache_story_analysis("story", "manga", &analysis).await.unwrap();

        assert_eq!(
            cache.get_cached_story_analysis("story", "manga").await.unwrap(),
            Some(analysis)
        );
        assert_eq!(cache.get_cached_story_analysis("story", "comic").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_story_breakdown_round_trip() {
        let cache = CacheManager::default();
        let analysis = json!({"scenes": 2});
        let breakdown = json!({"panels": [{"n": 1}, {"n": 2}]});

        cache.cache_story_breakdown(&analysis, "manga", &breakdown).await.unwrap();

        assert_eq!(
            cache.get_cached_story_breakdown(&json!({"scenes": 2}), "manga").await.unwrap(),
            Some(breakdown)
        );
        assert_eq!(
            cache.get_cached_story_breakdown(&json!({"scenes": 3}), "manga").await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_character_refs_round_trip() {
        let cache = CacheManager::default();
        let characters = vec![json!({"name": "Li"}), json!({"name": "Mei"})];
        let refs = json!([{"name": "Li", "image": "https://cdn/li.png"}]);

        cache
            .cache_character_refs(&characters, "harbor town", "manga", &refs)
            .await
            .unwrap();

        assert_eq!(
            cache
                .get_cached_character_refs(&characters, "harbor town", "manga")
                .await
                .unwrap(),
            Some(refs)
        );
        assert_eq!(
            cache
                .get_cached_character_refs(&characters, "desert", "manga")
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_helpers_do_not_collide() {
        let cache = CacheManager::default();
        let analysis = json!({"story": "s"});

        cache.cache_story_analysis("s", "manga", &analysis).await.unwrap();
        // Same style, different domain
        assert_eq!(
            cache.get_cached_story_breakdown(&json!("s"), "manga").await.unwrap(),
            None
        );
    }
}

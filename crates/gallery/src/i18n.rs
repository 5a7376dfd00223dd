//! User-facing strings for the supported UI languages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-TW")]
    ZhTw,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::ZhTw];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::ZhTw => "zh-TW",
        }
    }

    pub fn translations(self) -> &'static Translations {
        match self {
            Language::En => &EN,
            Language::ZhTw => &ZH_TW,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Language::En),
            "zh-tw" | "zh_tw" | "zh-hant" => Ok(Language::ZhTw),
            other => Err(format!("unsupported language code: {other}")),
        }
    }
}

/// String table for one language
#[derive(Debug)]
pub struct Translations {
    pub gallery_title: &'static str,
    pub gallery_subtitle: &'static str,
    pub generate_new_video: &'static str,
    pub prompt_placeholder: &'static str,
    pub generate: &'static str,
    /// Template with a `{prompt}` placeholder
    pub generating_from: &'static str,
    /// Template with a `{title}` placeholder
    pub remix_of: &'static str,
    pub generation_failed: &'static str,
    pub error_paid_tier: &'static str,
    pub error_select_project: &'static str,
    pub add_api_key: &'static str,
    pub close: &'static str,
    pub creating_remix: &'static str,
    pub animating_pixels: &'static str,
    pub composing_shot: &'static str,
    pub rendering_masterpiece: &'static str,
    pub take_a_few_moments: &'static str,
    pub wait_for_vision: &'static str,
    /// Template with a `{title}` placeholder
    pub play_video: &'static str,
    pub close_video_player: &'static str,
    pub video_text_prompt: &'static str,
    pub cancel: &'static str,
    pub edit_and_generate: &'static str,
    pub edit_video_details: &'static str,
    pub language: &'static str,
    pub english: &'static str,
    pub traditional_chinese: &'static str,
    pub favorite_video: &'static str,
    pub unfavorite_video: &'static str,
    pub delete_video: &'static str,
}

impl Translations {
    pub fn generated_title(&self, prompt: &str) -> String {
        self.generating_from.replace("{prompt}", prompt)
    }

    pub fn remix_title(&self, title: &str) -> String {
        self.remix_of.replace("{title}", title)
    }

    pub fn play_video_label(&self, title: &str) -> String {
        self.play_video.replace("{title}", title)
    }

    /// Display name of a language in this table's language
    pub fn language_name(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.english,
            Language::ZhTw => self.traditional_chinese,
        }
    }
}

pub static EN: Translations = Translations {
    gallery_title: "Veo Gallery",
    gallery_subtitle:
        "Select a video to generate your own variations or create a new one from a prompt.",
    generate_new_video: "Generate a New Video",
    prompt_placeholder: "e.g., A cinematic shot of a koala bear DJing in a forest",
    generate: "Generate",
    generating_from: "Generated: \"{prompt}\"",
    remix_of: "Remix of \"{title}\"",
    generation_failed: "Generation Failed",
    error_paid_tier: "Video generation is only available on the Paid Tier.",
    error_select_project: "Please select your Cloud Project to get started",
    add_api_key: "Add API Key",
    close: "Close",
    creating_remix: "Creating your remix...",
    animating_pixels: "Animating pixels...",
    composing_shot: "Composing the perfect shot...",
    rendering_masterpiece: "Rendering your masterpiece...",
    take_a_few_moments: "This can take a few moments...",
    wait_for_vision: "Please wait while we bring your vision to life.",
    play_video: "Play video: {title}",
    close_video_player: "Close video player",
    video_text_prompt: "Video text prompt",
    cancel: "Cancel",
    edit_and_generate: "Edit & Generate",
    edit_video_details: "Edit video details",
    language: "Language",
    english: "English",
    traditional_chinese: "繁體中文",
    favorite_video: "Favorite Video",
    unfavorite_video: "Unfavorite Video",
    delete_video: "Delete Video",
};

pub static ZH_TW: Translations = Translations {
    gallery_title: "Veo 畫廊",
    gallery_subtitle: "選擇一個影片來生成您自己的變體，或根據提示創建一個新的影片。",
    generate_new_video: "生成新影片",
    prompt_placeholder: "例如：一隻無尾熊在森林裡當 DJ 的電影鏡頭",
    generate: "生成",
    generating_from: "生成自：「{prompt}」",
    remix_of: "\"{title}\" 的混音版",
    generation_failed: "生成失敗",
    error_paid_tier: "影片生成功能僅在付費方案中提供。",
    error_select_project: "請選擇您的雲端專案以開始使用。",
    add_api_key: "新增 API 金鑰",
    close: "關閉",
    creating_remix: "正在創建您的混音版...",
    animating_pixels: "正在為像素注入活力...",
    composing_shot: "正在構圖完美鏡頭...",
    rendering_masterpiece: "正在渲染您的傑作...",
    take_a_few_moments: "這可能需要一些時間...",
    wait_for_vision: "請稍候，我們正在將您的想法變為現實。",
    play_video: "播放影片：{title}",
    close_video_player: "關閉影片播放器",
    video_text_prompt: "影片文字提示",
    cancel: "取消",
    edit_and_generate: "編輯與生成",
    edit_video_details: "編輯影片詳情",
    language: "語言",
    english: "English",
    traditional_chinese: "繁體中文",
    favorite_video: "收藏影片",
    unfavorite_video: "取消收藏",
    delete_video: "刪除影片",
};

/// Current UI language and its string table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Localizer {
    language: Language,
}

impl Localizer {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn current_language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn t(&self) -> &'static Translations {
        self.language.translations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        for language in Language::ALL {
            assert_eq!(language.code().parse::<Language>(), Ok(language));
        }
        assert_eq!(" ZH-tw ".parse::<Language>(), Ok(Language::ZhTw));
        assert!("fr".parse::<Language>().is_err());
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn test_templates() {
        assert_eq!(EN.generated_title("a cat"), "Generated: \"a cat\"");
        assert_eq!(EN.remix_title("Sunset"), "Remix of \"Sunset\"");
        assert_eq!(ZH_TW.generated_title("貓"), "生成自：「貓」");
        assert_eq!(EN.play_video_label("Sunset"), "Play video: Sunset");
    }

    #[test]
    fn test_switching_language() {
        let mut localizer = Localizer::default();
        assert_eq!(localizer.t().generate, "Generate");

        localizer.set_language(Language::ZhTw);
        assert_eq!(localizer.current_language(), Language::ZhTw);
        assert_eq!(localizer.t().generate, "生成");
        assert_eq!(localizer.t().language_name(Language::En), "English");
    }

    #[test]
    fn test_language_serde_codes() {
        assert_eq!(serde_json::to_string(&Language::ZhTw).unwrap(), "\"zh-TW\"");
        let parsed: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Language::En);
    }
}

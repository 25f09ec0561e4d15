//! Localization
//!
//! Built-in message catalogs for the console.

use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::screen::Translator;

const DOCS_EN: &str = "https://docs.emqx.io/broker/latest/en/advanced/http-api.html";
const DOCS_ZH: &str = "https://docs.emqx.io/broker/latest/cn/advanced/http-api.html";

/// Display language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    /// HTTP API documentation shown in the view dialog
    pub fn docs_url(&self) -> &'static str {
        match self {
            Self::Zh => DOCS_ZH,
            Self::En => DOCS_EN,
        }
    }
}

/// Anything unrecognised falls back to English
impl FromStr for Language {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" | "cn" => Self::Zh,
            _ => Self::En,
        })
    }
}

/// Static catalog for one language
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    language: Language,
}

impl Catalog {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    fn lookup(&self, key: &str) -> Option<&'static str> {
        let table = match self.language {
            Language::En => EN,
            Language::Zh => ZH,
        };
        table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        self.lookup(key).unwrap_or(key).to_string()
    }
}

const EN: &[(&str, &str)] = &[
    ("leftbar.applications", "Applications"),
    ("app.appId", "AppID"),
    ("app.name", "AppName"),
    ("app.desc", "Remark"),
    ("app.secret", "AppSecret"),
    ("app.status", "Status"),
    ("app.expired", "Expire Date"),
    ("app.expiredText", "Never Expire"),
    ("app.enable", "Allowed"),
    ("app.disable", "Denied"),
    ("app.enableText", "Click to disable access"),
    ("app.disableText", "Click to enable access"),
    ("app.errors", "Required"),
    ("app.newApp", "New App"),
    ("app.editApp", "Edit App"),
    ("app.viewApp", "View App"),
    ("app.guide", "Use AppID and AppSecret with the HTTP API, see"),
    ("app.docs", "docs"),
    ("app.empty", "No applications"),
    ("app.emptyHint", "Press 'n' to add one"),
    ("oper.oper", "Operation"),
    ("oper.view", "View"),
    ("oper.edit", "Edit"),
    ("oper.delete", "Delete"),
    ("oper.save", "Save"),
    ("oper.cancel", "Cancel"),
    ("oper.confirm", "Confirm"),
    ("oper.confirmDelete", "Confirm delete?"),
    ("oper.editSuccess", "Edit Success"),
    ("oper.copied", "Copied"),
    ("success.createSuccess", "Create Success"),
    ("error.networkError", "Network error"),
];

const ZH: &[(&str, &str)] = &[
    ("leftbar.applications", "应用"),
    ("app.appId", "AppID"),
    ("app.name", "应用名称"),
    ("app.desc", "备注"),
    ("app.secret", "应用密钥"),
    ("app.status", "状态"),
    ("app.expired", "到期时间"),
    ("app.expiredText", "永不过期"),
    ("app.enable", "允许"),
    ("app.disable", "拒绝"),
    ("app.enableText", "点击禁止访问"),
    ("app.disableText", "点击允许访问"),
    ("app.errors", "必填"),
    ("app.newApp", "新建应用"),
    ("app.editApp", "编辑应用"),
    ("app.viewApp", "查看应用"),
    ("app.guide", "AppID 与 AppSecret 可用于 HTTP API 认证，详见"),
    ("app.docs", "文档"),
    ("app.empty", "暂无应用"),
    ("app.emptyHint", "按 'n' 新建"),
    ("oper.oper", "操作"),
    ("oper.view", "查看"),
    ("oper.edit", "编辑"),
    ("oper.delete", "删除"),
    ("oper.save", "保存"),
    ("oper.cancel", "取消"),
    ("oper.confirm", "确定"),
    ("oper.confirmDelete", "确认删除？"),
    ("oper.editSuccess", "修改成功"),
    ("oper.copied", "已复制"),
    ("success.createSuccess", "创建成功"),
    ("error.networkError", "网络异常"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_known_key() {
        assert_eq!(Catalog::new(Language::En).translate("app.expiredText"), "Never Expire");
        assert_eq!(Catalog::new(Language::Zh).translate("oper.editSuccess"), "修改成功");
    }

    #[test]
    fn test_unknown_key_passes_through() {
        assert_eq!(Catalog::new(Language::En).translate("app.missing"), "app.missing");
    }

    #[test]
    fn test_catalogs_cover_same_keys() {
        for (key, _) in EN {
            assert!(ZH.iter().any(|(k, _)| k == key), "zh catalog missing {}", key);
        }
        assert_eq!(EN.len(), ZH.len());
    }

    #[test]
    fn test_language_parsing_and_docs() {
        assert_eq!("zh".parse::<Language>(), Ok(Language::Zh));
        assert_eq!(" ZH-CN ".parse::<Language>(), Ok(Language::Zh));
        assert_eq!("fr".parse::<Language>(), Ok(Language::En));
        assert!(Language::Zh.docs_url().contains("/cn/"));
        assert!(Language::En.docs_url().contains("/en/"));
    }
}

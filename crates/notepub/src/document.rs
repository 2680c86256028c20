//! The MCP configuration analysis page.
//!
//! Everything here is literal content: the builder takes only the target
//! database ID and returns the same tree on every call.

use notepub_notion::types::Color;
use notepub_notion::{Block, HeadingLevel, PageRequest, RichText, Table};

/// Page title (the database's `Name` property).
pub(crate) const TITLE: &str = "MCP 設定格式差異分析指南";

/// Section labels printed after a successful publish.
pub(crate) const SUMMARY: &[&str] = &[
    "📋 MCP 格式總覽",
    "🔧 各 IDE 設定範例",
    "📊 格式比較矩陣",
    "🎯 關鍵發現與結論",
    "💡 使用建議",
];

const CURSOR_CONFIG: &str = r#"{
  "mcpServers": [
    {
      "name": "figma-ai-bridge",
      "url": "http://localhost:3000/figma",
      "description": "Figma 設計稿解析服務"
    }
  ],
  "aiParameters": {
    "temperature": 0.7,
    "maxTokens": 2048
  }
}"#;

const CLAUDE_DESKTOP_CONFIG: &str = r#"{
  "mcpServers": {
    "filesystem": {
      "command": "npx",
      "args": ["-y", "@modelcontextprotocol/server-filesystem"]
    },
    "github": {
      "command": "npx",
      "args": ["-y", "@modelcontextprotocol/server-github"],
      "env": {
        "GITHUB_PERSONAL_ACCESS_TOKEN": "${GITHUB_TOKEN}"
      }
    }
  }
}"#;

const CLAUDE_DESKTOP_CONFIG_PATH: &str =
    "~/Library/Application Support/Claude/claude_desktop_config.json";

const FOOTER: &str = "📅 建立日期：2025-06-11 | 📝 版本：v1.0 | 👤 作者：Christian Wu";

/// Build the page request for `database_id`.
pub(crate) fn analysis_page(database_id: &str) -> PageRequest {
    PageRequest::in_database(database_id, TITLE).with_children(content_blocks())
}

fn content_blocks() -> Vec<Block> {
    let mut blocks = overview();
    blocks.extend(config_examples());
    blocks.extend(comparison());
    blocks.extend(conclusions());
    blocks.extend(footer());
    blocks
}

fn overview() -> Vec<Block> {
    vec![
        Block::heading(HeadingLevel::One, "📋 總覽 | Overview"),
        Block::paragraph([
            RichText::plain("本文件分析 "),
            RichText::plain("Cursor、VS Code、Trae 和 Claude Desktop").bold(),
            RichText::plain(" 在 MCP (Model Context Protocol) 設定格式上的核心差異。"),
        ]),
        Block::Divider,
        Block::heading(HeadingLevel::Two, "🎯 關鍵發現"),
        Block::callout(
            "💡",
            [RichText::plain(
                "Claude Desktop 使用與 Cursor 幾乎相同的格式，採用 mcpServers 根鍵！",
            )
            .bold()],
        ),
    ]
}

fn config_examples() -> Vec<Block> {
    vec![
        Block::heading(HeadingLevel::Two, "🔧 設定格式範例"),
        Block::heading(HeadingLevel::Three, "Cursor MCP 設定"),
        Block::code("json", CURSOR_CONFIG),
        Block::heading(HeadingLevel::Three, "Claude Desktop MCP 設定 ⭐"),
        Block::paragraph([
            RichText::plain("配置檔案位置："),
            RichText::plain(CLAUDE_DESKTOP_CONFIG_PATH).code(),
        ]),
        Block::code("json", CLAUDE_DESKTOP_CONFIG),
    ]
}

fn comparison() -> Vec<Block> {
    let table = Table::from_rows(
        true,
        [
            ["IDE", "根鍵", "相容性"],
            ["Cursor", "mcpServers", "🟢 完全相容"],
            ["VS Code", "servers", "🟡 需要轉換"],
            ["Claude Desktop", "mcpServers", "🟢 原生支援"],
        ]
        .map(|row| row.map(|cell| vec![RichText::plain(cell)])),
    );

    vec![
        Block::heading(HeadingLevel::Two, "📊 格式比較"),
        Block::Table(table),
    ]
}

fn conclusions() -> Vec<Block> {
    vec![
        Block::heading(HeadingLevel::Two, "💡 結論與建議"),
        Block::bulleted([RichText::plain("最佳遷移路徑：Cursor ↔ Claude Desktop（零成本）").bold()]),
        Block::bulleted([RichText::plain("企業級應用：VS Code 提供最佳安全性")]),
        Block::bulleted([RichText::plain("高效能需求：Trae 提供專案感知功能")]),
    ]
}

fn footer() -> Vec<Block> {
    vec![
        Block::Divider,
        Block::paragraph([RichText::plain(FOOTER).italic().color(Color::Gray)]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    const DB: &str = "20ede957-d4e5-8033-b64d-fb4f53111611";

    fn block_types(request: &PageRequest) -> Vec<String> {
        let value = serde_json::to_value(request).unwrap();
        value["children"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["type"].as_str().unwrap().to_owned())
            .collect()
    }

    #[test]
    fn test_builder_is_deterministic() {
        let first = analysis_page(DB);
        let second = analysis_page(DB);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_block_order() {
        assert_eq!(
            block_types(&analysis_page(DB)),
            [
                "heading_1",
                "paragraph",
                "divider",
                "heading_2",
                "callout",
                "heading_2",
                "heading_3",
                "code",
                "heading_3",
                "paragraph",
                "code",
                "heading_2",
                "table",
                "heading_2",
                "bulleted_list_item",
                "bulleted_list_item",
                "bulleted_list_item",
                "divider",
                "paragraph",
            ]
        );
    }

    #[test]
    fn test_parent_and_title() {
        let request = analysis_page(DB);
        assert_eq!(request.database_id(), DB);
        assert_eq!(request.title().as_deref(), Some(TITLE));

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["parent"], json!({"database_id": DB}));
        assert_eq!(
            value["properties"]["Name"]["title"][0]["text"]["content"],
            TITLE
        );
    }

    #[test]
    fn test_every_table_row_matches_width() {
        let request = analysis_page(DB);
        let tables: Vec<&Table> = request
            .children
            .iter()
            .filter_map(|b| match b {
                Block::Table(t) => Some(t),
                _ => None,
            })
            .collect();

        assert_eq!(tables.len(), 1);
        let table = tables[0];
        assert_eq!(table.width(), 3);
        assert_eq!(table.rows().len(), 4);
        assert!(table.has_column_header());
        assert!(!table.has_row_header());
        for row in table.rows() {
            assert_eq!(row.cells.len(), table.width());
        }
    }

    #[test]
    fn test_json_round_trip_is_lossless() {
        let request = analysis_page(DB);
        let json = serde_json::to_string(&request).unwrap();
        let parsed: PageRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn test_passes_api_limits() {
        assert!(analysis_page(DB).validate().is_ok());
    }

    #[test]
    fn test_code_blocks_hold_valid_json_samples() {
        let request = analysis_page(DB);
        let samples: Vec<&str> = request
            .children
            .iter()
            .filter_map(|b| match b {
                Block::Code { language, text } if language == "json" => {
                    Some(text[0].content.as_str())
                }
                _ => None,
            })
            .collect();

        assert_eq!(samples.len(), 2);
        let cursor: Value = serde_json::from_str(samples[0]).unwrap();
        let claude: Value = serde_json::from_str(samples[1]).unwrap();
        assert!(cursor["mcpServers"].is_array());
        assert!(claude["mcpServers"].is_object());
    }

    #[test]
    fn test_mixed_style_runs() {
        let value = serde_json::to_value(analysis_page(DB)).unwrap();
        let children = &value["children"];

        assert_eq!(
            children[1]["paragraph"]["rich_text"][1]["annotations"],
            json!({"bold": true})
        );
        assert_eq!(
            children[9]["paragraph"]["rich_text"][1]["annotations"],
            json!({"code": true})
        );
        assert_eq!(children[4]["callout"]["icon"], json!({"emoji": "💡"}));
    }

    #[test]
    fn test_footer_is_italic_gray_literal_date() {
        let request = analysis_page(DB);
        let Some(Block::Paragraph(runs)) = request.children.last() else {
            panic!("footer paragraph missing");
        };
        assert_eq!(runs.len(), 1);
        assert!(runs[0].annotations.italic);
        assert_eq!(runs[0].annotations.color, Color::Gray);
        assert!(runs[0].content.contains("2025-06-11"));
    }
}

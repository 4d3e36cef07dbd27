//! Sub-issue title and body rendering.

use crate::catalog::{CatalogRecord, TicketKind};

/// Characters of body shown in dry-run previews.
pub const PREVIEW_CHARS: usize = 200;

/// A sub-issue ready to be filed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

impl TicketDraft {
    /// First [`PREVIEW_CHARS`] characters of the body, with `...` appended.
    pub fn preview(&self) -> String {
        preview(&self.body, PREVIEW_CHARS)
    }
}

/// The parent issue a sub-issue is split from.
#[derive(Debug, Clone, Copy)]
pub struct Parent<'a> {
    pub number: u64,
    pub title: &'a str,
}

/// Per-kind fixed text in the body template.
struct Template {
    summary: &'static str,
    first_step: &'static str,
    registry: &'static str,
    references: [&'static str; 2],
}

fn template(kind: TicketKind) -> Template {
    match kind {
        TicketKind::Moves => Template {
            summary: "の効果を持つ技を実装する。",
            first_step: "各技の特殊効果ロジッククラスを実装",
            registry: "MoveRegistry",
            references: [
                "server/src/modules/pokemon/domain/moves/move-registry.ts",
                "server/src/modules/pokemon/domain/moves/effects/",
            ],
        },
        TicketKind::Abilities => Template {
            summary: "の特性を実装する。",
            first_step: "各特性のロジッククラスを実装",
            registry: "AbilityRegistry",
            references: [
                "server/src/modules/pokemon/domain/abilities/ability-registry.ts",
                "server/src/modules/pokemon/domain/abilities/effects/",
            ],
        },
    }
}

/// Parent title up to the first full-width parenthesis, which starts the
/// "(N件)" count suffix.
pub fn title_stem(title: &str) -> &str {
    title.split('（').next().unwrap_or(title)
}

/// `[#<parent>] <stem>: <category> (<n>件)`
pub fn render_title(parent: Parent<'_>, category: &str, count: usize) -> String {
    format!(
        "[#{}] {}: {} ({}件)",
        parent.number,
        title_stem(parent.title),
        category,
        count
    )
}

/// Render one sub-issue for a category bucket.
pub fn render_ticket<R: CatalogRecord>(
    parent: Parent<'_>,
    category: &str,
    records: &[R],
    labels: &[String],
) -> TicketDraft {
    TicketDraft {
        title: render_title(parent, category, records.len()),
        body: render_body(R::KIND, parent.number, category, records),
        labels: labels.to_vec(),
    }
}

/// Render the markdown body.
pub fn render_body<R: CatalogRecord>(
    kind: TicketKind,
    parent_number: u64,
    category: &str,
    records: &[R],
) -> String {
    let t = template(kind);
    let noun = kind.noun();
    let listing = records
        .iter()
        .map(CatalogRecord::list_line)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"## 概要
Issue #{parent}のsubissue: {category}{summary}

## 実装対象の{noun}（{count}件）

{listing}

## 対応内容
- {first_step}
- 必要に応じて基底クラスを作成・拡張
- `{registry}`に登録
- テストケースを追加

## 注意事項
- 全ての{noun}を実装する必要がある（網羅性が重要）
- 実装完了後、テストスクリプト（`npm run check:coverage`）で網羅性を確認

## 参考
- `{ref_registry}`
- `{ref_effects}`

## 親Issue
#{parent}
"#,
        parent = parent_number,
        category = category,
        summary = t.summary,
        noun = noun,
        count = records.len(),
        listing = listing,
        first_step = t.first_step,
        registry = t.registry,
        ref_registry = t.references[0],
        ref_effects = t.references[1],
    )
}

/// Truncate to `max_chars` characters (not bytes) and append `...`.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

use super::{CardRecord, EMPTY_HINT, EMPTY_TITLE};

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn render_card(card: &CardRecord) -> String {
    format!(
        r#"    <div class="presentation-card" data-category="{category}">
      <div class="presentation-icon"><span aria-hidden="true">&#128196;</span></div>
      <h3>{title}</h3>
      <a href="{link}" class="btn btn-primary btn-download" target="_blank" rel="noopener">Открыть</a>
    </div>
"#,
        category = escape_html(&card.category),
        title = escape_html(&card.title),
        link = escape_html(&card.link),
    )
}

fn render_empty() -> String {
    format!(
        r#"    <div class="no-presentations">
      <h3>{EMPTY_TITLE}</h3>
      <p>{EMPTY_HINT}</p>
    </div>
"#
    )
}

pub fn render_html(cards: &[CardRecord]) -> Vec<u8> {
    let body = if cards.is_empty() {
        render_empty()
    } else {
        cards.iter().map(render_card).collect::<String>()
    };

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="ru">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>Презентации</title>
  <style>
    body {{ font-family: 'Inter', sans-serif; background: #f8fafc; color: #0f172a; margin: 0; }}
    main {{ max-width: 1200px; margin: 0 auto; padding: 40px 24px; }}
    #presentationContainer {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 24px; }}
    .presentation-card {{ background: #fff; border-radius: 12px; padding: 24px; box-shadow: 0 1px 3px rgba(15, 23, 42, 0.1); }}
    .presentation-icon {{ font-size: 32px; margin-bottom: 12px; }}
    .btn-download {{ display: inline-block; margin-top: 12px; padding: 8px 16px; border-radius: 8px; background: #135bec; color: #fff; text-decoration: none; }}
    .no-presentations {{ grid-column: 1 / -1; text-align: center; color: #64748b; }}
  </style>
</head>
<body>
  <main>
    <h1>Презентации</h1>
    <div id="presentationContainer">
{body}    </div>
  </main>
</body>
</html>
"####
    );
    html.into_bytes()
}

use crate::calc::{format_calories, Summary};
use crate::form::{FieldId, FieldRole, Output};
use crate::handlers::{DATE_FIELD, DROPDOWN_FIELD};
use crate::models::{Section, Theme};
use crate::tracker::CalorieTracker;
use std::fmt::Write;

pub fn render_index(tracker: &CalorieTracker, alert: Option<&str>) -> String {
    let form = tracker.form();
    let (output_class, output) = match form.output() {
        Output::Shown(summary) => ("output", render_summary(summary)),
        Output::Hidden => ("output hide", String::new()),
    };
    let chart = tracker
        .chart()
        .current()
        .map(|chart| chart.to_svg())
        .unwrap_or_default();
    let theme_class = match tracker.theme() {
        Theme::Light => "",
        Theme::Dark => "dark-mode",
    };

    INDEX_HTML
        .replace("{{THEME}}", theme_class)
        .replace("{{DATE_FIELD}}", DATE_FIELD)
        .replace("{{DROPDOWN_FIELD}}", DROPDOWN_FIELD)
        .replace("{{OPTIONS}}", &render_options())
        .replace("{{OUTPUT_CLASS}}", output_class)
        .replace("{{OUTPUT}}", &output)
        .replace("{{CHART}}", &chart)
        .replace("{{DATE}}", &tracker.date().to_string())
        .replace("{{BUDGET}}", &escape(form.budget()))
        .replace("{{SECTIONS}}", &render_sections(tracker))
        .replace("{{ALERT}}", &render_alert(alert))
}

fn render_options() -> String {
    Section::ALL
        .iter()
        .map(|section| format!(r#"<option value="{section}">{}</option>"#, section.label()))
        .collect()
}

fn render_sections(tracker: &CalorieTracker) -> String {
    let mut html = String::new();
    for section in Section::ALL {
        let _ = write!(
            html,
            r#"<fieldset id="{section}"><legend>{}</legend><div class="input-container">"#,
            section.label()
        );
        for (index, row) in tracker.form().rows(section).iter().enumerate() {
            let number = index + 1;
            for role in [FieldRole::Name, FieldRole::Calories] {
                let id = FieldId::row(section, number, role);
                let input = match role {
                    FieldRole::Name => r#"type="text""#,
                    FieldRole::Calories => r#"type="number" min="0""#,
                };
                let _ = write!(
                    html,
                    r#"<label for="{id}">Entry {number} {label}</label><input {input} id="{id}" name="{id}" placeholder="{label}" value="{value}" />"#,
                    label = role.label(),
                    value = escape(row.field(role)),
                );
            }
        }
        html.push_str("</div></fieldset>");
    }
    html
}

fn render_summary(summary: &Summary) -> String {
    let balance = summary.balance().as_str();
    format!(
        r#"<span class="{}">{} Calorie {balance}</span><hr><p>{} Calories Budgeted</p><p>{} Calories Consumed</p><p>{} Calories Burned</p>"#,
        balance.to_lowercase(),
        format_calories(summary.magnitude()),
        format_calories(summary.budget),
        format_calories(summary.consumed()),
        format_calories(summary.burned()),
    )
}

fn render_alert(alert: Option<&str>) -> String {
    let Some(message) = alert else {
        return String::new();
    };
    let literal = serde_json::to_string(message).unwrap_or_default();
    format!("<script>alert({});</script>", literal.replace("</", "<\\/"))
}

/// Escapes text for attribute and element content. Braces are escaped so user
/// text can never look like a template placeholder.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Calorie Counter</title>
  <style>
    :root {
      --bg: #f5f6f7;
      --ink: #1b1b32;
      --card: #ffffff;
      --accent: #3b3b4f;
      --surplus: #c63b2b;
      --deficit: #2d7a4b;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    body.dark-mode {
      --bg: #1b1b32;
      --ink: #f5f6f7;
      --card: #2a2a40;
      --accent: #dfdfe2;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      border-radius: 18px;
      padding: 32px;
      display: grid;
      gap: 20px;
    }

    h1 {
      margin: 0;
    }

    .controls,
    .actions {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: center;
    }

    fieldset {
      border: 1px solid rgba(59, 59, 79, 0.2);
      border-radius: 12px;
      margin: 0 0 12px;
    }

    .input-container {
      display: grid;
      grid-template-columns: max-content 1fr;
      gap: 8px 12px;
      align-items: center;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: var(--card);
    }

    .default-action {
      position: absolute;
      left: -9999px;
    }

    .hide {
      display: none;
    }

    .surplus {
      color: var(--surplus);
    }

    .deficit {
      color: var(--deficit);
    }

    #calorieChart {
      width: 100%;
      height: 260px;
      display: block;
    }

    .chart-grid {
      stroke: rgba(59, 59, 79, 0.12);
    }

    .chart-axis {
      stroke: rgba(59, 59, 79, 0.4);
      stroke-dasharray: 4 6;
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }
  </style>
</head>
<body class="{{THEME}}">
  <main class="app">
    <h1>Calorie Counter</h1>
    <form id="calorie-counter" method="post" action="/calculate">
      <button type="submit" class="default-action" tabindex="-1" aria-hidden="true">Calculate</button>
      <div class="controls">
        <label for="{{DATE_FIELD}}">Date</label>
        <input type="date" id="{{DATE_FIELD}}" name="{{DATE_FIELD}}" value="{{DATE}}" />
        <label for="budget">Budget</label>
        <input type="number" min="0" id="budget" name="budget" placeholder="Daily calorie budget" value="{{BUDGET}}" />
      </div>
      {{SECTIONS}}
      <div class="controls">
        <label for="{{DROPDOWN_FIELD}}">Add food or exercise:</label>
        <select id="{{DROPDOWN_FIELD}}" name="{{DROPDOWN_FIELD}}">{{OPTIONS}}</select>
        <button type="submit" id="add-entry" formaction="/entry/add">Add Entry</button>
      </div>
      <div class="actions">
        <button type="submit" id="calculate">Calculate Remaining Calories</button>
        <button type="submit" id="clear" formaction="/clear">Clear</button>
        <button type="submit" id="toggle-theme" formaction="/theme">Toggle Theme</button>
      </div>
    </form>
    <div id="output" class="{{OUTPUT_CLASS}}">{{OUTPUT}}</div>
    <div class="chart-card">{{CHART}}</div>
  </main>
  <script>
    const form = document.getElementById('calorie-counter');
    document.getElementById('{{DATE_FIELD}}').addEventListener('change', () => {
      form.action = '/date';
      form.submit();
    });
  </script>
  {{ALERT}}
</body>
</html>
"#;

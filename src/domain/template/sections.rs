//! Section-based composition for custom layout templates, plus the
//! single-block wrapper used when content is only a body fragment.

use std::collections::BTreeMap;

use super::substitution::{substitute_variables, Variables};
use super::types::{Section, SectionType};

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Email Template</title>
    <style>
        body { font-family: Arial, sans-serif; font-size: 14px; line-height: 1.6; color: #333333; background-color: #ffffff; margin: 0; padding: 0; }
        .email-container { max-width: 600px; margin: 0 auto; background-color: #ffffff; box-shadow: 0 2px 8px rgba(0, 0, 0, 0.1); }
        .email-header { background-color: #2563eb; color: #ffffff; padding: 20px; text-align: center; font-size: 24px; font-weight: bold; }
        .email-body { padding: 30px 20px; background-color: #ffffff; }
        .email-footer { background-color: #f8fafc; padding: 20px; text-align: center; font-size: 12px; color: #64748b; border-top: 1px solid #e2e8f0; }
        .email-cta { text-align: center; margin: 30px 0; }
        .cta-button { background-color: #10b981; color: #ffffff; padding: 12px 24px; text-decoration: none; border-radius: 6px; font-weight: bold; display: inline-block; }
        .spacer { height: 20px; }
    </style>
</head>
<body>
    <div class="email-container">
"#;

const PAGE_TAIL: &str = r#"
    </div>
</body>
</html>"#;

/// Compose a full HTML page from sections in authored order.
///
/// Placeholders in each section are substituted with `variables`; unknown
/// ones stay literal. Ordering is not checked, a footer-first template
/// renders footer first.
pub fn compose_sections(sections: &[Section], variables: &Variables, cta_link: &str) -> String {
    let body: String = sections
        .iter()
        .map(|section| render_section(section, variables, cta_link))
        .collect();

    let mut html = String::with_capacity(PAGE_HEAD.len() + body.len() + PAGE_TAIL.len());
    html.push_str(PAGE_HEAD);
    html.push_str(&body);
    html.push_str(PAGE_TAIL);
    html
}

/// Render one section into its container
pub fn render_section(section: &Section, variables: &Variables, cta_link: &str) -> String {
    if section.section_type == SectionType::Spacer {
        return r#"<div class="spacer"></div>"#.to_string();
    }

    let content = substitute_variables(&section.content, variables);
    let style = style_attr(section.styles.as_ref());

    match section.section_type {
        SectionType::Header => format!(r#"<div class="email-header"{}>{}</div>"#, style, content),
        SectionType::Body => format!(r#"<div class="email-body"{}>{}</div>"#, style, content),
        SectionType::Footer => format!(r#"<div class="email-footer"{}>{}</div>"#, style, content),
        SectionType::Cta if is_link(&content) => {
            format!(r#"<div class="email-cta"{}>{}</div>"#, style, content)
        }
        SectionType::Cta => format!(
            r#"<div class="email-cta"{}><a href="{}" class="cta-button">{}</a></div>"#,
            style, cta_link, content
        ),
        _ => format!("<div{}>{}</div>", style, content),
    }
}

fn is_link(content: &str) -> bool {
    content.contains("<a") || content.contains("href")
}

fn style_attr(styles: Option<&BTreeMap<String, String>>) -> String {
    match styles {
        Some(styles) if !styles.is_empty() => {
            let declarations: Vec<String> = styles
                .iter()
                .map(|(key, value)| format!("{}:{}", key, value.replace('"', "&quot;")))
                .collect();
            format!(r#" style="{}""#, declarations.join(";"))
        }
        _ => String::new(),
    }
}

/// Wrap a bare body fragment in a complete document.
///
/// The CTA button block is emitted only when both `cta` and `cta_link` are
/// non-empty and the link is not `#`.
pub fn wrap_fragment(content: &str, cta: &str, cta_link: &str, subject: &str) -> String {
    let cta_block = if !cta.is_empty() && !cta_link.is_empty() && cta_link != "#" {
        format!(
            r#"
              <div class="cta-container">
                <a href="{link}" class="button" target="_blank">{label}</a>
              </div>"#,
            link = cta_link,
            label = cta
        )
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{subject}</title>
    <style>
      body {{ margin:0; padding:0; -webkit-text-size-adjust:100%; -ms-text-size-adjust:100%; font-family: Arial, sans-serif; }}
      table {{ border-spacing:0; }}
      a {{ color:inherit; text-decoration:none; }}
      .wrapper {{ width:100%; background-color:#f5f7fb; padding:20px 0; }}
      .content {{ max-width:600px; margin:0 auto; background:#ffffff; border-radius:6px; overflow:hidden; box-shadow: 0 2px 8px rgba(0,0,0,0.1); }}
      .main {{ padding:24px; font-family:Arial, 'Helvetica Neue', Helvetica, sans-serif; color:#333333; font-size:16px; line-height:24px; }}
      .button {{ display:inline-block; padding:12px 24px; border-radius:6px; background:#007bff; color:#ffffff; font-weight:600; text-decoration:none; margin:20px 0; }}
      .cta-container {{ text-align:center; margin:24px 0; }}
      .footer {{ padding:16px 20px; font-size:12px; color:#8b94a6; text-align:center; background-color:#f1f1f1; }}
    </style>
  </head>
  <body>
    <div class="wrapper">
      <table class="content" width="600" cellpadding="0" cellspacing="0" role="presentation">
        <tr>
          <td class="main">
            <div>{content}</div>{cta_block}
          </td>
        </tr>
      </table>
    </div>
  </body>
</html>"#,
        subject = subject,
        content = content,
        cta_block = cta_block
    )
}

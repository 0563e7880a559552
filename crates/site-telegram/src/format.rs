//! Lead notice formatting for `parse_mode=HTML`

use std::fmt::Write;

use site_core::ContactNotice;

/// Escape the three characters the Bot API HTML parser cares about
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render a new lead as an HTML Telegram message
pub fn format_contact_notice(notice: &ContactNotice) -> String {
    let header = if notice.is_callback {
        "📞 <b>Заказ звонка</b>"
    } else {
        "✉️ <b>Новое сообщение</b>"
    };

    let mut text = format!("{header}\n\n");
    let _ = writeln!(text, "👤 <b>Имя:</b> {}", escape_html(&notice.name));
    let _ = writeln!(text, "📱 <b>Телефон:</b> {}", escape_html(&notice.phone));

    if let Some(email) = notice.email.as_deref().filter(|e| !e.is_empty()) {
        let _ = writeln!(text, "📧 <b>Email:</b> {}", escape_html(email));
    }

    if !notice.message.is_empty() {
        let _ = write!(
            text,
            "\n💬 <b>Сообщение:</b>\n{}\n",
            escape_html(&notice.message)
        );
    }

    text
}

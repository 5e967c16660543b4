//! HTML bodies for transactional email. Pure functions, no I/O.

use crate::auth::application::domain::entities::UserType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(heading: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; color: #1f2937; max-width: 600px; margin: 0 auto;">
    <h1 style="color: #2563eb;">{heading}</h1>
    {body}
    <p style="color: #6b7280; font-size: 12px;">This is an automated message, please do not reply.</p>
  </body>
</html>"#
    )
}

pub fn welcome_email(name: &str, user_type: UserType) -> EmailContent {
    let name = escape_html(name);
    let next_step = match user_type {
        UserType::Company => "Complete your company profile and publish your first job offer.",
        UserType::Candidate | UserType::Student => {
            "Complete your profile and upload your CV to start applying."
        }
        UserType::Admin => "Your back-office access is ready.",
    };

    EmailContent {
        subject: "Welcome to the platform".to_string(),
        html: layout(
            &format!("Welcome, {name}!"),
            &format!("<p>Your account has been created.</p>\n    <p>{next_step}</p>"),
        ),
    }
}

pub fn admin_notification_email(title: &str, lines: &[String]) -> EmailContent {
    let title = escape_html(title);
    let items: String = lines
        .iter()
        .map(|line| format!("<li>{}</li>", escape_html(line)))
        .collect::<Vec<_>>()
        .join("\n      ");

    EmailContent {
        subject: title.clone(),
        html: layout(&title, &format!("<ul>\n      {items}\n    </ul>")),
    }
}

pub fn admin_invitation_email(name: &str, role_name: &str, link: &str) -> EmailContent {
    let name = escape_html(name);
    let role_name = escape_html(role_name);
    let link = escape_html(link);

    EmailContent {
        subject: "You have been appointed administrator".to_string(),
        html: layout(
            &format!("Hello {name},"),
            &format!(
                "<p>You now have the <strong>{role_name}</strong> role.</p>\n    \
                 <p><a href=\"{link}\">Open the back-office</a></p>"
            ),
        ),
    }
}

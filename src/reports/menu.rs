use crate::reports::UNNAMED_GROUP;

/// The command overview
#[must_use]
pub fn render_menu(bot_name: &str, prefix: &str) -> String {
    format!(
        "📜 {bot_name} Menu\n\
         - {prefix}menu — Show this menu\n\
         - {prefix}owner — Show owner contact\n\
         - {prefix}ranking — Show global rankings\n\
         - {prefix}daily — Show today’s rankings\n\
         - {prefix}weekly — Show this week’s rankings\n\
         - {prefix}myrank — Show your rank profile"
    )
}

/// The owner contact, or a note that none is configured
#[must_use]
pub fn render_owner(owner_number: Option<&str>) -> String {
    match owner_number {
        Some(number) => format!("👤 Owner: +{number}\nYou can reach out for support."),
        None => "👤 No owner contact has been configured.".to_string(),
    }
}

/// The reply to a command nobody handles
#[must_use]
pub fn render_unknown(command: &str, prefix: &str) -> String {
    format!("Unknown command: {command}\nType {prefix}menu")
}

/// The greeting for someone who joined a group
#[must_use]
pub fn render_welcome(name: &str, group_subject: Option<&str>, prefix: &str) -> String {
    let group = group_subject.filter(|s| !s.is_empty()).unwrap_or(UNNAMED_GROUP);
    format!("👋 Welcome, {name}! You’re now part of {group}.\nType {prefix}menu to see commands.")
}

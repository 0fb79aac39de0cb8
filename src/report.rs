//! `/info` user report

use crate::storage::User;

/// One report line, 1-based `position`, newline terminated.
pub fn user_line(position: usize, user: &User) -> String {
    format!(
        "{}. ID: {}, Телефон: {}, Создан: {}\n",
        position,
        user.telegram_id,
        user.phone.as_deref().unwrap_or("не указан"),
        user.created_at.format("%Y-%m-%d"),
    )
}

/// Packs whole lines into chunks of at most `max_chars` characters.
///
/// A line is never split; a single line longer than `max_chars` gets a
/// chunk of its own. No empty chunks are produced.
pub fn paginate<I, S>(lines: I, max_chars: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for line in lines {
        let line = line.as_ref();
        let line_chars = line.chars().count();
        if current_chars > 0 && current_chars + line_chars > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        current.push_str(line);
        current_chars += line_chars;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Renders the full user report split into message-sized chunks.
pub fn render_users(users: &[User], max_chars: usize) -> Vec<String> {
    paginate(
        users.iter().enumerate().map(|(i, user)| user_line(i + 1, user)),
        max_chars,
    )
}

//! Output formatting helpers.

use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use chirp_core::{Comment, Post, User};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dimmed status line to stderr.
pub fn status(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a post as a block: header line, content, counters.
pub fn post(post: &Post) {
    println!(
        "{} {} {}",
        format!("#{}", post.id).dimmed(),
        format!("@{}", post.author.username).bold(),
        age(post.created_at, Utc::now()).dimmed()
    );
    println!("{}", post.content);
    let heart = if post.is_liked {
        "♥".red()
    } else {
        "♡".normal()
    };
    println!(
        "{} {}  {} {}",
        heart,
        post.likes_count,
        "💬".normal(),
        post.comments_count
    );
}

pub fn comment(comment: &Comment) {
    println!(
        "{} {} {}",
        format!("#{}", comment.id).dimmed(),
        format!("@{}", comment.author.username).bold(),
        age(comment.created_at, Utc::now()).dimmed()
    );
    println!("  {}", comment.content);
}

/// Print a one-line user summary.
pub fn user_line(user: &User) {
    println!(
        "{} {}",
        format!("#{}", user.id).dimmed(),
        format!("@{}", user.username).bold()
    );
}

/// Print a full profile.
pub fn profile(user: &User) {
    field("Username", &user.username);
    field("ID", &user.id.to_string());
    if let Some(email) = &user.email {
        field("Email", email);
    }
    if let Some(avatar) = &user.avatar {
        field("Avatar", avatar);
    }
    field("Followers", &user.followers_count.to_string());
    field("Following", &user.following_count.to_string());
    if let Some(following) = user.is_following {
        field("You follow", if following { "yes" } else { "no" });
    }
    if let Some(created_at) = user.created_at {
        field("Joined", &created_at.format("%Y-%m-%d").to_string());
    }
}

/// Relative age of a timestamp, e.g. `5m`, `3h`, `2d`; older than a week
/// prints the date.
pub fn age(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    if elapsed.num_seconds() < 60 {
        "now".to_string()
    } else if elapsed.num_minutes() < 60 {
        format!("{}m", elapsed.num_minutes())
    } else if elapsed.num_hours() < 24 {
        format!("{}h", elapsed.num_hours())
    } else if elapsed.num_days() < 7 {
        format!("{}d", elapsed.num_days())
    } else {
        at.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn age_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        assert_eq!(age(now - Duration::seconds(10), now), "now");
        assert_eq!(age(now - Duration::minutes(5), now), "5m");
        assert_eq!(age(now - Duration::hours(3), now), "3h");
        assert_eq!(age(now - Duration::days(2), now), "2d");
        assert_eq!(age(now - Duration::days(30), now), "2024-04-10");
    }

    #[test]
    fn future_timestamps_read_as_now() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        assert_eq!(age(now + Duration::minutes(5), now), "now");
    }
}

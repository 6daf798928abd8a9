use crate::application::ports::mail::MailMessage;
use crate::domain::article::Article;
use crate::domain::user::EmailAddress;

const EXCERPT_CHARS: usize = 200;

/// Builds the mail a subscriber receives when `article` is published.
pub fn approval_message(
    to: EmailAddress,
    article: &Article,
    author: &str,
    publisher: Option<&str>,
) -> MailMessage {
    let teaser = if article.summary.is_blank() {
        excerpt(article.content.as_str())
    } else {
        article.summary.as_str().to_string()
    };

    let body = format!(
        "A new article has been published.\n\n\
         Title: {title}\n\
         Author: {author}\n\
         Publisher: {publisher}\n\n\
         {teaser}\n",
        title = article.title,
        publisher = publisher.unwrap_or("Independent"),
    );

    MailMessage {
        to,
        subject: format!("New Article Published: {}", article.title),
        body,
    }
}

/// First 200 characters followed by `...`; shorter text is kept whole.
pub fn excerpt(content: &str) -> String {
    match content.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::{ArticleContent, ArticleId, ArticleSummary, ArticleTitle, Review};
    use crate::domain::user::UserId;
    use chrono::Utc;

    fn article(summary: &str, content: &str) -> Article {
        let now = Utc::now();
        Article {
            id: ArticleId::new(1).unwrap(),
            title: ArticleTitle::new("Harbour reopens").unwrap(),
            content: ArticleContent::new(content).unwrap(),
            summary: ArticleSummary::new(summary).unwrap(),
            author_id: UserId::new(2).unwrap(),
            publisher_id: None,
            review: Review::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn excerpt_cuts_on_char_boundaries() {
        let long = "ü".repeat(250);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), 203);
        assert!(cut.ends_with("..."));
        assert_eq!(excerpt("short"), "short");
        assert_eq!(excerpt(&"a".repeat(200)), "a".repeat(200));
    }

    #[test]
    fn message_prefers_summary_and_names_independent_authors() {
        let to = EmailAddress::new("r@example.com").unwrap();
        let msg = approval_message(to.clone(), &article("Boats are back", "Long body"), "jane", None);
        assert_eq!(msg.subject, "New Article Published: Harbour reopens");
        assert!(msg.body.contains("Author: jane"));
        assert!(msg.body.contains("Publisher: Independent"));
        assert!(msg.body.contains("Boats are back"));
        assert!(!msg.body.contains("Long body"));

        let msg = approval_message(to, &article("", "Long body"), "jane", Some("Daily"));
        assert!(msg.body.contains("Publisher: Daily"));
        assert!(msg.body.contains("Long body"));
    }
}

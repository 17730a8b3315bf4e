//! The post record, its request body, and the seed data.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post as stored and as rendered on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    /// Instant of creation or of the last accepted update.
    #[serde(with = "js_date")]
    pub date: DateTime<Utc>,
}

/// Body of `POST /posts` and `PATCH /posts/{id}`.
///
/// Every field is optional at the parsing layer. An empty string is treated
/// the same as an absent field; see [`PostInput::title`] and friends.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PostInput {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    author: Option<String>,
}

impl PostInput {
    pub fn new(
        title: Option<&str>,
        content: Option<&str>,
        author: Option<&str>,
    ) -> Self {
        Self {
            title: title.map(str::to_owned),
            content: content.map(str::to_owned),
            author: author.map(str::to_owned),
        }
    }

    pub fn title(&self) -> Option<&str> { supplied(&self.title) }
    pub fn content(&self) -> Option<&str> { supplied(&self.content) }
    pub fn author(&self) -> Option<&str> { supplied(&self.author) }

    /// True when none of the three fields carries a value.
    pub fn is_empty(&self) -> bool {
        self.title().is_none() && self.content().is_none() && self.author().is_none()
    }

    /// Names of the fields that are missing, in title, content, author order.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("title", self.title()),
            ("content", self.content()),
            ("author", self.author()),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

fn supplied(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

// ── PostId ────────────────────────────────────────────────────────────────────

/// An id taken from a request path.
///
/// Parsing never fails: a segment without leading digits becomes the
/// not-a-number id, which compares unequal to every post and prints as `NaN`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PostId(Option<i64>);

impl PostId {
    /// Parses like JavaScript's `parseInt(s, 10)`: optional leading
    /// whitespace and sign, then the longest run of ASCII digits. Trailing
    /// garbage is ignored (`"12abc"` is 12).
    pub fn parse(s: &str) -> Self {
        let s = s.trim_start();
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Self(None);
        }
        // Overflow folds into NaN: no stored id can be that large anyway.
        let value = rest[..digits].parse::<i64>().ok().map(|v| if negative { -v } else { v });
        Self(value)
    }

    pub fn value(self) -> Option<i64> { self.0 }

    pub fn matches(self, id: i64) -> bool {
        self.0 == Some(id)
    }
}

impl From<i64> for PostId {
    fn from(id: i64) -> Self { Self(Some(id)) }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{id}"),
            None => f.write_str("NaN"),
        }
    }
}

// ── Seed data ─────────────────────────────────────────────────────────────────

/// The three posts present at startup. Ids 1 through 3.
pub fn seed() -> Vec<Post> {
    vec![
        seed_post(
            1,
            "The Rise of Decentralized Finance",
            "Decentralized Finance (DeFi) is an emerging and rapidly evolving field in the blockchain industry. It refers to the shift from traditional, centralized financial systems to peer-to-peer finance enabled by decentralized technologies built on Ethereum and other blockchains. With the promise of reduced dependency on the traditional banking sector, DeFi platforms offer a wide range of services, from lending and borrowing to insurance and trading.",
            "Alex Thompson",
            "2023-08-01T10:00:00Z",
        ),
        seed_post(
            2,
            "The Impact of Artificial Intelligence on Modern Businesses",
            "Artificial Intelligence (AI) is no longer a concept of the future. It's very much a part of our present, reshaping industries and enhancing the capabilities of existing systems. From automating routine tasks to offering intelligent insights, AI is proving to be a boon for businesses. With advancements in machine learning and deep learning, businesses can now address previously insurmountable problems and tap into new opportunities.",
            "Mia Williams",
            "2023-08-05T14:30:00Z",
        ),
        seed_post(
            3,
            "Sustainable Living: Tips for an Eco-Friendly Lifestyle",
            "Sustainability is more than just a buzzword; it's a way of life. As the effects of climate change become more pronounced, there's a growing realization about the need to live sustainably. From reducing waste and conserving energy to supporting eco-friendly products, there are numerous ways we can make our daily lives more environmentally friendly. This post will explore practical tips and habits that can make a significant difference.",
            "Samuel Green",
            "2023-08-10T09:15:00Z",
        ),
    ]
}

fn seed_post(
    id: i64,
    title: &str,
    content: &str,
    author: &str,
    date: &str,
) -> Post {
    Post {
        id,
        title: title.to_owned(),
        content: content.to_owned(),
        author: author.to_owned(),
        date: DateTime::parse_from_rfc3339(date)
            .expect("seed dates are RFC 3339 literals")
            .with_timezone(&Utc),
    }
}

/// `Date#toJSON` format: RFC 3339, UTC, millisecond precision, `Z` suffix.
mod js_date {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_follows_parse_int() {
        assert_eq!(PostId::parse("42").value(), Some(42));
        assert_eq!(PostId::parse("  7").value(), Some(7));
        assert_eq!(PostId::parse("12abc").value(), Some(12));
        assert_eq!(PostId::parse("3.9").value(), Some(3));
        assert_eq!(PostId::parse("-1").value(), Some(-1));
        assert_eq!(PostId::parse("abc").value(), None);
        assert_eq!(PostId::parse("").value(), None);
        assert_eq!(PostId::parse("-").value(), None);
        assert_eq!(PostId::parse("99999999999999999999999").value(), None);
    }

    #[test]
    fn nan_matches_nothing() {
        let nan = PostId::parse("x");
        assert!(!nan.matches(0));
        assert!(!nan.matches(1));
        assert_eq!(nan.to_string(), "NaN");
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let input: PostInput =
            serde_json::from_str(r#"{"title":"","content":"body","author":null}"#).unwrap();
        assert_eq!(input.title(), None);
        assert_eq!(input.content(), Some("body"));
        assert_eq!(input.missing(), vec!["title", "author"]);
        assert!(!input.is_empty());
        assert!(PostInput::default().is_empty());
    }

    #[test]
    fn date_serialises_like_a_js_date() {
        let json = serde_json::to_value(&seed()[0]).unwrap();
        assert_eq!(json["date"], "2023-08-01T10:00:00.000Z");
        assert_eq!(json["id"], 1);
        assert_eq!(json["author"], "Alex Thompson");
    }

    #[test]
    fn seed_has_three_posts() {
        let posts = seed();
        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let dates: Vec<String> = posts.iter()
            .map(|p| p.date.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
            .collect();
        assert_eq!(dates, ["2023-08-01T10:00:00Z", "2023-08-05T14:30:00Z", "2023-08-10T09:15:00Z"]);
    }
}

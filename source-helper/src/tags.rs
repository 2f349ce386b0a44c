/// Most tags a result carries for display.
pub const MAX_TAGS: usize = 3;

/// Sources send tags either as plain strings or as records carrying a `tag_name`.
/// Anything else is accepted and ignored, a tag never invalidates its drama.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum Tag {
    Plain(String),
    Record { tag_name: Option<String> },
    Other(serde::de::IgnoredAny),
}

impl Tag {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Plain(inner) => Some(inner.as_str()),
            Self::Record { tag_name } => tag_name.as_deref(),
            Self::Other(_) => None,
        }
    }
}

/// Every non blank name, in order.
pub fn names<'a, I>(input: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Tag>,
{
    input
        .into_iter()
        .filter_map(Tag::name)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Keeps the first [`MAX_TAGS`] non blank names, in order.
pub fn collect<'a, I>(input: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Tag>,
{
    let mut res = names(input);
    res.truncate(MAX_TAGS);
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_read_both_shapes() {
        let tags: Vec<Tag> = serde_json::from_str(
            r#"["Romance", {"tag_id": 12, "tag_name": "CEO"}, {"tag_name": "Revenge"}]"#,
        )
        .unwrap();
        assert_eq!(collect(&tags), vec!["Romance", "CEO", "Revenge"]);
    }

    #[test]
    fn should_truncate_in_order() {
        let tags: Vec<Tag> = ["a", "b", "c", "d", "e", "f", "g"]
            .into_iter()
            .map(|name| Tag::Plain(name.to_string()))
            .collect();
        assert_eq!(collect(&tags), vec!["a", "b", "c"]);
    }

    #[test]
    fn should_ignore_unreadable_tags() {
        let tags: Vec<Tag> = serde_json::from_str(
            r#"[{"tag_name": "ok"}, {"tag_id": 2, "tag_name": null}, 17, {"tag_id": 3}, "Romance"]"#,
        )
        .unwrap();
        assert_eq!(tags.len(), 5);
        assert_eq!(collect(&tags), vec!["ok", "Romance"]);
    }

    #[test]
    fn should_skip_blank_names() {
        let tags = vec![
            Tag::Plain("  ".into()),
            Tag::Record {
                tag_name: Some("Drama".into()),
            },
        ];
        assert_eq!(collect(&tags), vec!["Drama"]);
    }
}

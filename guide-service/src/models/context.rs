//! Request-side models: the caller's design context and knowledge base.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Body of a guide request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideRequest {
    pub context: RequestContext,
    pub knowledge_base: KnowledgeBase,
}

/// What the caller is designing for.
///
/// Only `platform` is required and must be a string. The other fields are
/// free-form JSON, rendered into the prompt the way they were sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub platform: String,

    #[serde(default)]
    pub service: Option<Value>,

    /// Mood keyword, matched against the knowledge base's color groups.
    #[serde(default)]
    pub keyword: Option<Value>,

    /// Usually a hex-like color string such as `#112233`. Not validated.
    #[serde(default)]
    pub primary_color: Option<Value>,
}

/// Caller-supplied reference material, sent with every request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KnowledgeBase {
    /// Platform name (lowercase) to guideline object.
    pub guidelines: Map<String, Value>,

    /// Named mood color groups, in document order.
    pub iri_colors: ColorGroups,
}

/// Color groups keyed by name, preserving the order they appeared in the
/// request so that "first match" is well defined.
///
/// Entries are kept as raw JSON; a group's `keywords` list is only read when
/// a lookup reaches it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorGroups(Vec<(String, Value)>);

impl ColorGroups {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, group)| (name.as_str(), group))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for ColorGroups {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = ColorGroups;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of color group name to color group")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut groups = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, group)) = map.next_entry::<String, serde_json::Value>()? {
                    groups.push((name, group));
                }
                Ok(ColorGroups(groups))
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}

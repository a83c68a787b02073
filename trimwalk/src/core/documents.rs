//! Adapters for parsed JSON and TOML document trees.
//!
//! Object and table keys are map keys and are never rewritten. The
//! `toml_edit` adapters keep comments, key order, and whitespace around
//! values; only the string contents change.

use crate::core::node::{Entries, Node, TextCell, TextSlot, Walk};

impl Walk for serde_json::Value {
    fn node(&mut self) -> Node<'_> {
        use serde_json::Value;
        match self {
            Value::String(text) => Node::Text(TextSlot::Owned(text)),
            Value::Array(items) => items.node(),
            Value::Object(map) => Node::Map(map),
            Value::Null | Value::Bool(_) | Value::Number(_) => Node::Opaque,
        }
    }
}

impl Entries for serde_json::Map<String, serde_json::Value> {
    fn len(&self) -> usize {
        serde_json::Map::len(self)
    }

    /// Values are swapped out for `Null` while detached so the map never
    /// loses a key, whatever its ordering backend.
    fn rebind_each(&mut self, visit: &mut dyn FnMut(&mut dyn Walk)) {
        let keys: Vec<String> = self.keys().cloned().collect();
        for key in keys {
            if let Some(slot) = self.get_mut(&key) {
                let mut value = std::mem::take(slot);
                visit(&mut value);
                *slot = value;
            }
        }
    }
}

impl Walk for toml::Value {
    fn node(&mut self) -> Node<'_> {
        use toml::Value;
        match self {
            Value::String(text) => Node::Text(TextSlot::Owned(text)),
            Value::Array(items) => items.node(),
            Value::Table(table) => Node::Map(table),
            Value::Integer(_) | Value::Float(_) | Value::Boolean(_) | Value::Datetime(_) => {
                Node::Opaque
            }
        }
    }
}

impl Entries for toml::Table {
    fn len(&self) -> usize {
        toml::Table::len(self)
    }

    fn rebind_each(&mut self, visit: &mut dyn FnMut(&mut dyn Walk)) {
        let keys: Vec<String> = self.keys().cloned().collect();
        for key in keys {
            if let Some(slot) = self.get_mut(&key) {
                let mut value = std::mem::replace(slot, toml::Value::Boolean(false));
                visit(&mut value);
                *slot = value;
            }
        }
    }
}

impl Walk for toml_edit::Item {
    fn node(&mut self) -> Node<'_> {
        use toml_edit::Item;
        match self {
            Item::Value(value) => value.node(),
            Item::Table(table) => Node::Map(table),
            Item::ArrayOfTables(tables) => Node::Sequence(
                tables
                    .iter_mut()
                    .map(|table| table as &mut dyn Walk)
                    .collect(),
            ),
            Item::None => Node::Opaque,
        }
    }
}

impl Walk for toml_edit::Value {
    fn node(&mut self) -> Node<'_> {
        use toml_edit::Value;
        match self {
            Value::String(text) => Node::Text(TextSlot::Cell(text)),
            Value::Array(items) => {
                Node::Sequence(items.iter_mut().map(|item| item as &mut dyn Walk).collect())
            }
            Value::InlineTable(table) => Node::Map(table),
            Value::Integer(_) | Value::Float(_) | Value::Boolean(_) | Value::Datetime(_) => {
                Node::Opaque
            }
        }
    }
}

impl Walk for toml_edit::Table {
    fn node(&mut self) -> Node<'_> {
        Node::Map(self)
    }
}

/// Items are edited where they sit, so key order and decoration survive.
impl Entries for toml_edit::Table {
    fn len(&self) -> usize {
        toml_edit::Table::len(self)
    }

    fn rebind_each(&mut self, visit: &mut dyn FnMut(&mut dyn Walk)) {
        for (_, item) in self.iter_mut() {
            visit(item);
        }
    }
}

impl Entries for toml_edit::InlineTable {
    fn len(&self) -> usize {
        toml_edit::InlineTable::len(self)
    }

    fn rebind_each(&mut self, visit: &mut dyn FnMut(&mut dyn Walk)) {
        for (_, value) in self.iter_mut() {
            visit(value);
        }
    }
}

impl TextCell for toml_edit::Formatted<String> {
    fn text(&self) -> &str {
        self.value()
    }

    /// The quoting style is re-derived; surrounding decoration is kept.
    fn replace(&mut self, text: String) {
        let decor = self.decor().clone();
        let mut next = toml_edit::Formatted::new(text);
        *next.decor_mut() = decor;
        *self = next;
    }
}

#[cfg(test)]
mod tests {
    use crate::core::mutator::{Trimmer, trim_all};
    use serde_json::json;

    #[test]
    fn json_strings_trimmed_keys_untouched() {
        let mut doc = json!({
            " padded key ": " value ",
            "list": [" a ", 1, true, null, {"deep": "  b  "}],
        });
        trim_all(&mut doc);
        assert_eq!(
            doc,
            json!({
                " padded key ": "value",
                "list": ["a", 1, true, null, {"deep": "b"}],
            })
        );
    }

    #[test]
    fn json_walk_counts_texts() {
        let mut doc = json!(["x", " y ", {"z": " z "}]);
        let summary = Trimmer::new().run(&mut doc);
        assert_eq!(summary.texts, 3);
        assert_eq!(summary.rewritten, 2);
    }

    #[test]
    fn toml_strings_trimmed_datetimes_untouched() {
        let table: toml::Table = toml::from_str(
            r#"
title = "  Report  "
when = 1979-05-27T07:32:00Z

[owner]
name = " Tom "
tags = [" a ", "b "]
"#,
        )
        .expect("parse toml");
        let mut doc = toml::Value::Table(table);
        trim_all(&mut doc);
        assert_eq!(doc["title"].as_str(), Some("Report"));
        assert_eq!(doc["owner"]["name"].as_str(), Some("Tom"));
        assert_eq!(doc["owner"]["tags"][0].as_str(), Some("a"));
        assert_eq!(doc["owner"]["tags"][1].as_str(), Some("b"));
        assert!(doc["when"].as_datetime().is_some());
    }

    #[test]
    fn json_object_keeps_insertion_order() {
        let mut doc: serde_json::Value =
            serde_json::from_str(r#"{"zeta": " z ", "alpha": "a", "mid": {"y": 1, "b": " b "}}"#)
                .expect("parse json");
        trim_all(&mut doc);
        assert_eq!(
            serde_json::to_string(&doc).expect("render"),
            r#"{"zeta":"z","alpha":"a","mid":{"y":1,"b":"b"}}"#
        );
    }

    #[test]
    fn toml_edit_keeps_comments_and_order() {
        let mut doc: toml_edit::DocumentMut = r#"# keep me
zeta = " z "   # trailing
alpha = 1
inline = { b = " b ", a = "a" }

[[servers]]
name = "  east  "

[[servers]]
name = "west"
"#
        .parse()
        .expect("parse toml");

        let summary = Trimmer::new().run(doc.as_table_mut());

        assert_eq!(summary.rewritten, 3);
        assert_eq!(
            doc.to_string(),
            r#"# keep me
zeta = "z"   # trailing
alpha = 1
inline = { b = "b", a = "a" }

[[servers]]
name = "east"

[[servers]]
name = "west"
"#
        );
    }
}

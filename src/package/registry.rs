//! Resource identity: content-addressed deduplication, sequential id
//! assignment, and collision-free naming.
//!
//! Registration is first-writer-wins: the id is assigned at insertion time,
//! and per-base-name collision counters only ever increase, even when a
//! later registration deduplicates away. This keeps id and name assignment
//! reproducible for a fixed traversal order.

use std::collections::HashMap;

use sha1_smol::Sha1;

use super::{ResourceKind, ResourceRecord};
use crate::util::to_base36;

/// Cheap reference to a registered resource, for building placements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle {
    pub id: String,
    pub name: String,
}

/// Owns all resource records of one in-progress conversion.
#[derive(Debug)]
pub struct ResourceRegistry {
    item_id_base: String,
    next_item_index: u64,
    records: Vec<ResourceRecord>,
    by_hash: HashMap<String, usize>,
    /// Permanent per-base-name counters; never reset, never reused.
    name_counters: HashMap<String, u64>,
}

impl ResourceRegistry {
    pub fn new(item_id_base: &str) -> Self {
        Self {
            item_id_base: item_id_base.to_string(),
            next_item_index: 0,
            records: Vec::new(),
            by_hash: HashMap::new(),
            name_counters: HashMap::new(),
        }
    }

    fn next_item_id(&mut self) -> String {
        let id = format!("{}{}", self.item_id_base, to_base36(self.next_item_index));
        self.next_item_index += 1;
        id
    }

    /// Register a resource, deduplicating by content.
    ///
    /// `hash_payload` is the canonical content when it differs from the
    /// stored bytes: images hash their raw pixel buffer, not the encoded
    /// payload, so re-encoding artifacts cannot split identical art.
    /// Generated documents pass `None` and hash `data` itself. A hash hit
    /// returns the existing record untouched; otherwise a new record is
    /// created with a fresh id and a collision-resolved name derived from
    /// `raw_file_name`.
    ///
    /// `in_package_root` stores a component at the package root instead of
    /// `Components/` (used for the top-level conversion entry).
    pub fn register(
        &mut self,
        kind: ResourceKind,
        raw_file_name: &str,
        hash_payload: Option<&[u8]>,
        data: Vec<u8>,
        in_package_root: bool,
    ) -> ResourceHandle {
        let hash = Sha1::from(hash_payload.unwrap_or(&data))
            .digest()
            .to_string();
        if let Some(&idx) = self.by_hash.get(&hash) {
            let record = &self.records[idx];
            return ResourceHandle {
                id: record.id.clone(),
                name: record.name.clone(),
            };
        }

        let id = self.next_item_id();

        let (basename, ext) = split_extension(raw_file_name);
        let mut basename = strip_name_decorators(basename);
        loop {
            match self.name_counters.get(&basename).copied() {
                None => {
                    self.name_counters.insert(basename.clone(), 1);
                    break;
                }
                Some(count) => {
                    self.name_counters.insert(basename.clone(), count + 1);
                    basename = format!("{basename}_{count}");
                }
            }
        }
        let name = format!("{basename}{ext}");

        let path = match kind {
            ResourceKind::Image => "/Images/",
            ResourceKind::Component if !in_package_root => "/Components/",
            ResourceKind::Component => "/",
        };

        let record = ResourceRecord {
            id: id.clone(),
            name: name.clone(),
            kind,
            path: path.to_string(),
            data,
        };
        self.by_hash.insert(hash, self.records.len());
        self.records.push(record);

        ResourceHandle { id, name }
    }

    /// Number of distinct records registered so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finish the registry, yielding records in registration order.
    pub fn into_records(self) -> Vec<ResourceRecord> {
        self.records
    }
}

fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(dot) => (&file_name[..dot], &file_name[dot..]),
        None => (file_name, ""),
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Strip decorator fragments from a base name: `grip@...` names drop every
/// `word@` prefix, everything else drops every `@word` suffix.
fn strip_name_decorators(basename: &str) -> String {
    if basename.contains("grip@") {
        remove_word_at_runs(basename)
    } else {
        remove_at_word_runs(basename)
    }
}

/// Remove every maximal word run that is immediately followed by `@`,
/// together with the `@`.
fn remove_word_at_runs(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < bytes.len() {
        if is_word_byte(bytes[i]) {
            let mut j = i;
            while j < bytes.len() && is_word_byte(bytes[j]) {
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b'@' {
                i = j + 1;
                continue;
            }
            out.push_str(&s[i..j]);
            i = j;
        } else {
            // copy the full UTF-8 character
            let ch_len = s[i..].chars().next().map(char::len_utf8).unwrap_or(1);
            out.push_str(&s[i..i + ch_len]);
            i += ch_len;
        }
    }
    out
}

/// Remove every `@` together with the word run that follows it.
fn remove_at_word_runs(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'@' {
            i += 1;
            while i < bytes.len() && is_word_byte(bytes[i]) {
                i += 1;
            }
        } else {
            // copy the full UTF-8 character
            let ch_len = s[i..].chars().next().map(char::len_utf8).unwrap_or(1);
            out.push_str(&s[i..i + ch_len]);
            i += ch_len;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn registry() -> ResourceRegistry {
        ResourceRegistry::new("0z")
    }

    #[test]
    fn test_sequential_ids() {
        let mut reg = registry();
        let a = reg.register(ResourceKind::Image, "a.png", None, b"aaa".to_vec(), false);
        let b = reg.register(ResourceKind::Image, "b.png", None, b"bbb".to_vec(), false);
        assert_eq!(a.id, "0z0");
        assert_eq!(b.id, "0z1");
    }

    #[test]
    fn test_dedup_by_content_hash() {
        let mut reg = registry();
        let a = reg.register(ResourceKind::Image, "a.png", None, b"same".to_vec(), false);
        let b = reg.register(
            ResourceKind::Image,
            "elsewhere.png",
            None,
            b"same".to_vec(),
            false,
        );
        let c = reg.register(ResourceKind::Image, "c.png", None, b"other".to_vec(), false);
        assert_eq!(a, b, "identical content must resolve to one record");
        assert_ne!(a, c);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_name_collision_sequence() {
        let mut reg = registry();
        let names: Vec<String> = (0..3)
            .map(|i| {
                let payload = vec![i as u8];
                reg.register(ResourceKind::Image, "icon.png", None, payload, false)
                    .name
            })
            .collect();
        assert_eq!(names, vec!["icon.png", "icon_1.png", "icon_2.png"]);
    }

    #[test]
    fn test_decorator_stripping() {
        assert_eq!(strip_name_decorators("icon@up"), "icon");
        assert_eq!(strip_name_decorators("label@title"), "label");
        assert_eq!(strip_name_decorators("grip@Slider"), "Slider");
        assert_eq!(strip_name_decorators("plain"), "plain");
    }

    #[test]
    fn test_storage_paths() {
        let mut reg = registry();
        reg.register(ResourceKind::Image, "a.png", None, vec![1], false);
        reg.register(ResourceKind::Component, "b.xml", None, vec![2], false);
        reg.register(ResourceKind::Component, "c.xml", None, vec![3], true);
        let records = reg.into_records();
        assert_eq!(records[0].path, "/Images/");
        assert_eq!(records[1].path, "/Components/");
        assert_eq!(records[2].path, "/");
    }

    #[test]
    fn test_collision_counter_survives_dedup() {
        let mut reg = registry();
        reg.register(ResourceKind::Image, "icon.png", None, b"a".to_vec(), false);
        // deduplicated: must not consume a name
        reg.register(ResourceKind::Image, "icon.png", None, b"a".to_vec(), false);
        let third = reg.register(ResourceKind::Image, "icon.png", None, b"b".to_vec(), false);
        assert_eq!(third.name, "icon_1.png");
    }

    proptest! {
        #[test]
        fn prop_registered_names_are_unique(
            payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 1..8), 1..20)
        ) {
            let mut reg = registry();
            let mut names = std::collections::HashSet::new();
            for payload in &payloads {
                let handle = reg.register(
                    ResourceKind::Image,
                    "sprite.png",
                    None,
                    payload.clone(),
                    false,
                );
                names.insert(handle.name);
            }
            // one distinct name per distinct payload
            let distinct: std::collections::HashSet<_> = payloads.iter().collect();
            prop_assert_eq!(names.len(), distinct.len());
        }
    }
}

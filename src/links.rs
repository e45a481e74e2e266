//! Type links for rendered documentation.
//!
//! A field type links either to the anchor of a structure documented in
//! the same run, or to the Kubernetes API reference for well-known
//! external types. Everything else renders as plain text.

use crate::model::TypeInfo;
use std::collections::{BTreeMap, HashSet};

const K8S_API_DOCS: &str = "https://kubernetes.io/docs/reference/generated/kubernetes-api/v1.20/";

/// External type name → API reference fragment.
const DEFAULT_LINKS: &[(&str, &str)] = &[
    ("metav1.ObjectMeta", "#objectmeta-v1-meta"),
    ("metav1.ListMeta", "#listmeta-v1-meta"),
    ("metav1.LabelSelector", "#labelselector-v1-meta"),
    ("metav1.Time", "#time-v1-meta"),
    ("v1.ResourceRequirements", "#resourcerequirements-v1-core"),
    ("v1.LocalObjectReference", "#localobjectreference-v1-core"),
    ("v1.SecretKeySelector", "#secretkeyselector-v1-core"),
    ("v1.PersistentVolumeClaim", "#persistentvolumeclaim-v1-core"),
    ("v1.EmptyDirVolumeSource", "#emptydirvolumesource-v1-core"),
    ("apiextensionsv1.JSON", "#json-v1-apiextensions-k8s-io"),
    ("corev1.LocalObjectReference", "#localobjectreference-v1-core"),
    ("corev1.ResourceRequirements", "#resourcerequirements-v1-core"),
    ("corev1.PersistentVolumeClaimSpec", "#persistentvolumeclaim-v1-core"),
    ("corev1.SecretKeySelector", "#secretkeyselector-v1-core"),
    ("corev1.ConfigMapKeySelector", "#configmapkeyselector-v1-core"),
];

/// How a type reference is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// Points at the anchor of a documented structure.
    Anchor(String),
    /// Points at external documentation.
    External(String),
    Plain,
}

impl Reference {
    /// Wrap `text` in a Markdown link when there is a target.
    pub fn decorate(&self, text: &str) -> String {
        match self {
            Reference::Anchor(anchor) => format!("[{}](#{})", text, anchor),
            Reference::External(url) => format!("[{}]({})", text, url),
            Reference::Plain => text.to_string(),
        }
    }
}

/// Curated external link table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTable {
    links: BTreeMap<String, String>,
}

impl Default for LinkTable {
    fn default() -> Self {
        let links = DEFAULT_LINKS
            .iter()
            .map(|(name, fragment)| (name.to_string(), format!("{}{}", K8S_API_DOCS, fragment)))
            .collect();
        Self { links }
    }
}

impl LinkTable {
    /// The default table with user entries added or replaced.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut table = Self::default();
        table
            .links
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        table
    }

    pub fn get(&self, type_name: &str) -> Option<&str> {
        self.links.get(type_name).map(String::as_str)
    }

    /// Decide how a field type is presented.
    ///
    /// `documented` holds the names of the structures extracted in this run.
    pub fn resolve(&self, ty: &TypeInfo, documented: &HashSet<&str>) -> Reference {
        if ty.internal {
            if documented.contains(ty.base_type.as_str()) {
                return Reference::Anchor(ty.base_type.clone());
            }
            return Reference::Plain;
        }
        match self.get(&ty.base_type) {
            Some(url) => Reference::External(url.to_string()),
            None => Reference::Plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Constructor;

    fn info(name: &str, base: &str, internal: bool) -> TypeInfo {
        TypeInfo {
            name: name.to_string(),
            base_type: base.to_string(),
            constructor: Constructor::None,
            internal,
        }
    }

    #[test]
    fn internal_documented_is_anchor() {
        let documented: HashSet<&str> = ["ClusterSpec"].into_iter().collect();
        let table = LinkTable::default();
        let reference = table.resolve(&info("*ClusterSpec", "ClusterSpec", true), &documented);
        assert_eq!(reference, Reference::Anchor("ClusterSpec".into()));
        assert_eq!(reference.decorate("*ClusterSpec"), "[*ClusterSpec](#ClusterSpec)");
    }

    #[test]
    fn internal_undocumented_is_plain() {
        let table = LinkTable::default();
        let reference = table.resolve(&info("string", "string", true), &HashSet::new());
        assert_eq!(reference, Reference::Plain);
        assert_eq!(reference.decorate("string"), "string");
    }

    #[test]
    fn external_known_links_to_reference() {
        let table = LinkTable::default();
        let reference = table.resolve(&info("[]metav1.Time", "metav1.Time", false), &HashSet::new());
        assert_eq!(
            reference.decorate("[]metav1.Time"),
            "[[]metav1.Time](https://kubernetes.io/docs/reference/generated/kubernetes-api/v1.20/#time-v1-meta)"
        );
    }

    #[test]
    fn external_unknown_is_plain() {
        let table = LinkTable::default();
        let reference = table.resolve(&info("foo.Bar", "foo.Bar", false), &HashSet::new());
        assert_eq!(reference, Reference::Plain);
    }

    #[test]
    fn external_never_uses_anchor() {
        let documented: HashSet<&str> = ["metav1.Time"].into_iter().collect();
        let table = LinkTable::default();
        let reference = table.resolve(&info("metav1.Time", "metav1.Time", false), &documented);
        assert!(matches!(reference, Reference::External(_)));
    }

    #[test]
    fn overrides_add_and_replace() {
        let mut overrides = BTreeMap::new();
        overrides.insert("metav1.Duration".to_string(), "https://example.com/duration".to_string());
        overrides.insert("metav1.Time".to_string(), "https://example.com/time".to_string());
        let table = LinkTable::with_overrides(&overrides);
        assert_eq!(table.get("metav1.Duration"), Some("https://example.com/duration"));
        assert_eq!(table.get("metav1.Time"), Some("https://example.com/time"));
        assert!(table.get("metav1.ObjectMeta").is_some());
    }
}

use crate::node::Node;
use crc32fast::Hasher;

/// Derive a stable document seed from a template name using CRC32
pub fn get_document_seed(name: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(b"mailclip://");
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for nodes within a document.
///
/// IDs have the form `<seed>-<n>` and are never handed out twice by the same
/// generator.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(name: &str) -> Self {
        Self {
            seed: get_document_seed(name),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Continue numbering after the highest `<seed>-<n>` id already present
    /// in `nodes`, so ids from a loaded tree are not reused. Only suffixes
    /// that fit a `u32` are considered.
    pub fn resume(seed: String, nodes: &[Node]) -> Self {
        let prefix = format!("{}-", seed);
        let mut count = 0;
        for root in nodes {
            root.walk(&mut |node| {
                if let Some(n) = node
                    .id
                    .strip_prefix(&prefix)
                    .and_then(|suffix| suffix.parse::<u32>().ok())
                {
                    count = count.max(u64::from(n));
                }
            });
        }
        Self { seed, count }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentType;

    #[test]
    fn test_seed_is_stable() {
        let a = get_document_seed("newsletter");
        let b = get_document_seed("newsletter");
        assert_eq!(a, b);
        assert_ne!(a, get_document_seed("receipt"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::new("newsletter");

        let id1 = gen.new_id();
        let id2 = gen.new_id();

        assert!(id1.ends_with("-1"));
        assert!(id2.ends_with("-2"));
        assert!(id1.starts_with(gen.seed()));
    }

    #[test]
    fn test_resume_skips_existing_ids() {
        let nodes = vec![Node::new("abc-4", ComponentType::Section).with_children(vec![
            Node::new("abc-9", ComponentType::Column).with_children(vec![]),
            Node::new("foreign-99", ComponentType::Text),
        ])];

        let mut gen = IdGenerator::resume("abc".to_string(), &nodes);
        assert_eq!(gen.new_id(), "abc-10");
    }

    #[test]
    fn test_resume_from_largest_suffix() {
        let nodes = vec![
            Node::new("abc-4294967295", ComponentType::Text),
            Node::new("abc-99999999999999999999", ComponentType::Text),
        ];

        let mut gen = IdGenerator::resume("abc".to_string(), &nodes);
        assert_eq!(gen.new_id(), "abc-4294967296");
        assert_eq!(gen.new_id(), "abc-4294967297");
    }
}

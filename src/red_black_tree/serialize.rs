use crate::compare::Compare;
use crate::red_black_tree::tree::RedBlackTree;
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

// A tree is written as the sequence of its keys in ascending order.
impl<T, C> Serialize for RedBlackTree<T, C>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

struct TreeVisitor<T, C> {
    marker: PhantomData<fn() -> RedBlackTree<T, C>>,
}

impl<'de, T, C> Visitor<'de> for TreeVisitor<T, C>
where
    T: Deserialize<'de>,
    C: Compare<T> + Default,
{
    type Value = RedBlackTree<T, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of keys")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut tree = RedBlackTree::default();
        while let Some(key) = seq.next_element()? {
            tree.insert(key);
        }
        Ok(tree)
    }
}

impl<'de, T, C> Deserialize<'de> for RedBlackTree<T, C>
where
    T: Deserialize<'de>,
    C: Compare<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(TreeVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::red_black_tree::RedBlackTree;
    use serde_test::{assert_de_tokens, assert_ser_tokens, Token};

    #[test]
    fn test_ser_empty() {
        let tree: RedBlackTree<u32> = RedBlackTree::new();
        assert_ser_tokens(&tree, &[Token::Seq { len: Some(0) }, Token::SeqEnd]);
    }

    #[test]
    fn test_ser_in_order() {
        let tree = vec![3, 1, 2].into_iter().collect::<RedBlackTree<u32>>();
        assert_ser_tokens(
            &tree,
            &[
                Token::Seq { len: Some(3) },
                Token::U32(1),
                Token::U32(2),
                Token::U32(3),
                Token::SeqEnd,
            ],
        );
    }

    #[test]
    fn test_de_unordered() {
        let tree = vec![1, 2, 3].into_iter().collect::<RedBlackTree<u32>>();
        assert_de_tokens(
            &tree,
            &[
                Token::Seq { len: Some(3) },
                Token::U32(3),
                Token::U32(1),
                Token::U32(2),
                Token::SeqEnd,
            ],
        );
    }
}

//! Serializable tree descriptions
//!
//! A [`TreeDescription`] is the plain-data form of a tree, used to load and save
//! trees as JSON:
//!
//! ```
//! use matrix_tree::TreeDescription;
//!
//! let json = r#"{
//!     "internal": { "rows": 2, "cols": 2, "children": [
//!         { "leaf": { "rows": 2, "cols": 2, "data": [1, 0, 0, 1] } },
//!         { "leaf": { "rows": 2, "cols": 2, "data": [2, 0, 0, 2] } }
//!     ] }
//! }"#;
//!
//! let tree = TreeDescription::from_json(json).unwrap().build().unwrap();
//! assert_eq!(tree.collapse().unwrap().as_slice(), &[3.0, 0.0, 0.0, 3.0]);
//! ```
//!
//! Non-finite leaf values are written as the strings `"inf"`, `"-inf"` and
//! `"NaN"`, which JSON numbers cannot hold.

use serde::{Deserialize, Serialize};

use crate::error::{MatrixTreeError, Result};
use crate::node::Node;

/// Deepest tree [`Node::describe`] accepts. Deeper descriptions would exceed
/// the nesting `serde_json` is willing to parse back.
pub const MAX_DESCRIPTION_DEPTH: usize = 40;

/// Plain-data description of a tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeDescription {
    /// A leaf; missing `data` means all zeros
    Leaf {
        /// Declared rows
        rows: usize,
        /// Declared columns
        cols: usize,
        /// Row-major values
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            with = "leaf_values"
        )]
        data: Option<Vec<f64>>,
    },

    /// An internal node summing its children
    Internal {
        /// Declared rows
        rows: usize,
        /// Declared columns
        cols: usize,
        /// Children in collapse order
        #[serde(default)]
        children: Vec<TreeDescription>,
    },
}

impl TreeDescription {
    /// Build a tree through the regular constructors, so every
    /// construction and population check applies.
    pub fn build(self) -> Result<Node> {
        match self {
            TreeDescription::Leaf { rows, cols, data } => match data {
                Some(data) => Node::leaf_with_data(rows, cols, &data),
                None => Node::leaf(rows, cols),
            },
            TreeDescription::Internal {
                rows,
                cols,
                children,
            } => {
                let children = children
                    .into_iter()
                    .map(TreeDescription::build)
                    .collect::<Result<Vec<_>>>()?;
                Node::internal_with_children(rows, cols, children)
            }
        }
    }

    /// Parse a JSON description
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl TryFrom<TreeDescription> for Node {
    type Error = MatrixTreeError;

    fn try_from(desc: TreeDescription) -> Result<Self> {
        desc.build()
    }
}

impl TryFrom<&Node> for TreeDescription {
    type Error = MatrixTreeError;

    /// Capture a tree. An internal node that was never populated is
    /// described with an empty child list.
    fn try_from(node: &Node) -> Result<Self> {
        if node.depth() > MAX_DESCRIPTION_DEPTH {
            return Err(MatrixTreeError::DepthLimitExceeded {
                limit: MAX_DESCRIPTION_DEPTH,
            });
        }
        Ok(capture(node))
    }
}

fn capture(node: &Node) -> TreeDescription {
    match node.leaf_data() {
        Some(data) => TreeDescription::Leaf {
            rows: node.rows(),
            cols: node.cols(),
            data: Some(data.to_vec()),
        },
        None => TreeDescription::Internal {
            rows: node.rows(),
            cols: node.cols(),
            children: node.children().iter().map(capture).collect(),
        },
    }
}

impl Node {
    /// Describe this tree as plain data.
    ///
    /// Fails with [`MatrixTreeError::DepthLimitExceeded`] for trees deeper
    /// than [`MAX_DESCRIPTION_DEPTH`].
    pub fn describe(&self) -> Result<TreeDescription> {
        TreeDescription::try_from(self)
    }
}

/// Leaf values as JSON numbers, or strings for the non-finite ones.
mod leaf_values {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Value {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(
        data: &Option<Vec<f64>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        data.as_ref()
            .map(|values| {
                values
                    .iter()
                    .map(|&v| {
                        if v.is_finite() {
                            Value::Number(v)
                        } else {
                            Value::Text(v.to_string())
                        }
                    })
                    .collect::<Vec<_>>()
            })
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<f64>>, D::Error> {
        let Some(values) = Option::<Vec<Value>>::deserialize(deserializer)? else {
            return Ok(None);
        };
        values
            .into_iter()
            .map(|value| match value {
                Value::Number(v) => Ok(v),
                Value::Text(text) => text
                    .parse()
                    .map_err(|_| D::Error::custom(format!("invalid leaf value {text:?}"))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

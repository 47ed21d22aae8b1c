//! Reference expression model
//!
//! Environment variable declarations arrive as untyped JSON values that may
//! carry CloudFormation intrinsics (`Ref`, `Fn::ImportValue`, `Fn::Join`,
//! `Fn::GetAtt`). They are parsed ONCE at the boundary into an explicit
//! tagged union; the evaluator never does ad-hoc key checks.
//!
//! Dispatch precedence when more than one recognized key is present:
//! `Ref` > `Fn::ImportValue` > `Fn::Join` > `Fn::GetAtt`. An object with none
//! of the recognized keys is an opaque literal, never an error.

use serde_json::Value;

use crate::error::{Error, Result};

const REF_KEY: &str = "Ref";
const IMPORT_VALUE_KEY: &str = "Fn::ImportValue";
const JOIN_KEY: &str = "Fn::Join";
const GET_ATT_KEY: &str = "Fn::GetAtt";

/// Target of a `Ref` expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefTarget {
    /// `AWS::Region` - the provider region of the current deployment
    Region,
    /// `AWS::AccountId` - the account the stack is deployed into
    AccountId,
    /// `AWS::StackId` - the id of the current stack
    StackId,
    /// `AWS::StackName` - the configured stack name
    StackName,
    /// Any other name: a logical resource id within the stack
    LogicalId(String),
}

impl RefTarget {
    fn parse(name: &str) -> Self {
        match name {
            "AWS::Region" => RefTarget::Region,
            "AWS::AccountId" => RefTarget::AccountId,
            "AWS::StackId" => RefTarget::StackId,
            "AWS::StackName" => RefTarget::StackName,
            other => RefTarget::LogicalId(other.to_string()),
        }
    }
}

/// A parsed reference expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A plain value that resolves to itself (scalars, arrays, and
    /// objects with no recognized intrinsic key)
    Literal(Value),
    /// `{"Ref": target}`
    Ref(RefTarget),
    /// `{"Fn::ImportValue": exportName}`
    ImportValue(String),
    /// `{"Fn::Join": [delimiter, [parts...]]}` - parts nest arbitrarily
    Join {
        delimiter: String,
        parts: Vec<Expression>,
    },
    /// `{"Fn::GetAtt": [logicalId, attributeName]}`
    GetAtt {
        logical_id: String,
        attribute: String,
    },
}

impl Expression {
    /// Parse an untyped value into an expression tree.
    ///
    /// A recognized intrinsic key with a payload of the wrong shape is a
    /// [`Error::MalformedExpression`]; an object with no recognized key
    /// is kept verbatim as a literal.
    pub fn from_value(value: &Value) -> Result<Expression> {
        let map = match value.as_object() {
            Some(map) => map,
            None => return Ok(Expression::Literal(value.clone())),
        };

        if let Some(target) = map.get(REF_KEY) {
            let name = target.as_str().ok_or_else(|| {
                Error::MalformedExpression(format!("Ref expects a string, got {}", target))
            })?;
            return Ok(Expression::Ref(RefTarget::parse(name)));
        }

        if let Some(name) = map.get(IMPORT_VALUE_KEY) {
            let name = name.as_str().ok_or_else(|| {
                Error::MalformedExpression(format!(
                    "Fn::ImportValue expects an export name, got {}",
                    name
                ))
            })?;
            return Ok(Expression::ImportValue(name.to_string()));
        }

        if let Some(join) = map.get(JOIN_KEY) {
            return Self::parse_join(join);
        }

        if let Some(get_att) = map.get(GET_ATT_KEY) {
            return Self::parse_get_att(get_att);
        }

        Ok(Expression::Literal(value.clone()))
    }

    // Join has two arguments: first the delimiter and second the values.
    fn parse_join(payload: &Value) -> Result<Expression> {
        let malformed = || {
            Error::MalformedExpression(format!(
                "Fn::Join expects [delimiter, [parts...]], got {}",
                payload
            ))
        };

        let args = payload.as_array().ok_or_else(malformed)?;
        if args.len() != 2 {
            return Err(malformed());
        }
        let delimiter = args[0].as_str().ok_or_else(malformed)?.to_string();
        let parts = args[1]
            .as_array()
            .ok_or_else(malformed)?
            .iter()
            .map(Expression::from_value)
            .collect::<Result<Vec<_>>>()?;

        Ok(Expression::Join { delimiter, parts })
    }

    fn parse_get_att(payload: &Value) -> Result<Expression> {
        let malformed = || {
            Error::MalformedExpression(format!(
                "Fn::GetAtt expects [logicalId, attributeName], got {}",
                payload
            ))
        };

        let args = payload.as_array().ok_or_else(malformed)?;
        if args.len() != 2 {
            return Err(malformed());
        }
        let logical_id = args[0].as_str().ok_or_else(malformed)?.to_string();
        let attribute = args[1].as_str().ok_or_else(malformed)?.to_string();

        Ok(Expression::GetAtt {
            logical_id,
            attribute,
        })
    }
}

use serde_json::Value;

use super::error::FilterError;
use super::types::{FilterOp, FilterWhereInfo};

/// Translates a structured JSON WHERE clause into a parameterized SQL
/// predicate. Only object-form clauses are accepted; raw SQL strings are not.
pub struct FilterWhere {
    param_values: Vec<Value>,
    param_index: usize,
    conditions: Vec<FilterWhereInfo>,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
            conditions: vec![],
        }
    }

    pub fn generate(
        where_data: &Value,
        starting_param_index: usize,
    ) -> Result<(String, Vec<Value>), FilterError> {
        let mut filter_where = Self::new(starting_param_index);
        filter_where.build(where_data)
    }

    pub fn validate(where_data: &Value) -> Result<(), FilterError> {
        if where_data.is_null() {
            return Ok(());
        }
        match where_data {
            Value::Object(_) => Ok(()),
            _ => Err(FilterError::InvalidWhereClause(
                "WHERE must be an object".to_string(),
            )),
        }
    }

    fn build(&mut self, where_data: &Value) -> Result<(String, Vec<Value>), FilterError> {
        self.param_values.clear();
        self.conditions.clear();

        self.parse_where_data(where_data)?;

        let mut sql_conditions = vec![];
        let conditions_snapshot = self.conditions.clone();
        for condition in &conditions_snapshot {
            sql_conditions.push(self.build_sql_condition(condition)?);
        }
        let where_clause = if sql_conditions.is_empty() {
            "1=1".to_string()
        } else {
            sql_conditions.join(" AND ")
        };
        Ok((where_clause, self.param_values.clone()))
    }

    fn parse_where_data(&mut self, where_data: &Value) -> Result<(), FilterError> {
        match where_data {
            Value::Object(obj) => {
                for (key, value) in obj {
                    if key.starts_with('$') {
                        self.parse_logical_operator(key, value)?;
                    } else {
                        self.parse_field_condition(key, value)?;
                    }
                }
                Ok(())
            }
            _ => Err(FilterError::InvalidWhereClause(
                "Unsupported WHERE format".to_string(),
            )),
        }
    }

    fn parse_logical_operator(&mut self, op: &str, value: &Value) -> Result<(), FilterError> {
        match op {
            "$and" | "$or" => {
                let arr = value.as_array().ok_or_else(|| {
                    FilterError::InvalidOperatorData(format!("{} requires array", op))
                })?;
                let mut sql_parts = Vec::new();
                for v in arr {
                    let (sql, params) = Self::generate(v, self.param_index)?;
                    self.param_values.extend(params);
                    sql_parts.push(format!("({})", sql));
                    self.param_index = self.param_values.len();
                }
                let joiner = if op == "$and" { " AND " } else { " OR " };
                let combined = sql_parts.join(joiner);
                // Store as a pseudo-condition whose column holds the SQL
                self.conditions.push(FilterWhereInfo {
                    column: combined,
                    operator: FilterOp::Composed,
                    data: Value::Null,
                });
                Ok(())
            }
            "$not" => {
                let (sql, params) = Self::generate(value, self.param_index)?;
                self.param_values.extend(params);
                self.param_index = self.param_values.len();
                self.conditions.push(FilterWhereInfo {
                    column: format!("NOT ({})", sql),
                    operator: FilterOp::Composed,
                    data: Value::Null,
                });
                Ok(())
            }
            _ => Err(FilterError::UnsupportedOperator(op.to_string())),
        }
    }

    fn parse_field_condition(&mut self, field: &str, value: &Value) -> Result<(), FilterError> {
        Self::validate_column_name(field)?;
        if let Value::Object(obj) = value {
            for (op_key, op_val) in obj {
                let operator = Self::map_operator(op_key)?;
                self.conditions.push(FilterWhereInfo {
                    column: field.to_string(),
                    operator,
                    data: op_val.clone(),
                });
            }
        } else {
            // Implicit equality: { field: value }
            self.conditions.push(FilterWhereInfo {
                column: field.to_string(),
                operator: FilterOp::Eq,
                data: value.clone(),
            });
        }
        Ok(())
    }

    fn validate_column_name(column: &str) -> Result<(), FilterError> {
        let mut chars = column.chars();
        let leading_ok = matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_');
        if !leading_ok || !column.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(FilterError::InvalidColumn(format!(
                "Invalid column name format: {}",
                column
            )));
        }
        Ok(())
    }

    fn map_operator(op_key: &str) -> Result<FilterOp, FilterError> {
        Ok(match op_key {
            "$eq" => FilterOp::Eq,
            "$ne" | "$neq" => FilterOp::Neq,
            "$gt" => FilterOp::Gt,
            "$gte" => FilterOp::Gte,
            "$lt" => FilterOp::Lt,
            "$lte" => FilterOp::Lte,
            "$like" => FilterOp::Like,
            "$ilike" => FilterOp::ILike,
            "$in" => FilterOp::In,
            "$between" => FilterOp::Between,
            other => return Err(FilterError::UnsupportedOperator(other.to_string())),
        })
    }

    fn build_sql_condition(&mut self, condition: &FilterWhereInfo) -> Result<String, FilterError> {
        // Pseudo conditions carry already-rendered SQL in the column slot
        if condition.operator == FilterOp::Composed {
            return Ok(condition.column.clone());
        }

        let quoted_column = format!("\"{}\"", condition.column);
        match condition.operator {
            FilterOp::Eq => {
                if condition.data.is_null() {
                    Ok(format!("{} IS NULL", quoted_column))
                } else {
                    Ok(format!(
                        "{} = {}",
                        quoted_column,
                        self.param(condition.data.clone())
                    ))
                }
            }
            FilterOp::Neq => {
                if condition.data.is_null() {
                    Ok(format!("{} IS NOT NULL", quoted_column))
                } else {
                    Ok(format!(
                        "{} <> {}",
                        quoted_column,
                        self.param(condition.data.clone())
                    ))
                }
            }
            FilterOp::Gt => Ok(format!(
                "{} > {}",
                quoted_column,
                self.param(condition.data.clone())
            )),
            FilterOp::Gte => Ok(format!(
                "{} >= {}",
                quoted_column,
                self.param(condition.data.clone())
            )),
            FilterOp::Lt => Ok(format!(
                "{} < {}",
                quoted_column,
                self.param(condition.data.clone())
            )),
            FilterOp::Lte => Ok(format!(
                "{} <= {}",
                quoted_column,
                self.param(condition.data.clone())
            )),
            FilterOp::Like => Ok(format!(
                "{} LIKE {}",
                quoted_column,
                self.param(condition.data.clone())
            )),
            FilterOp::ILike => Ok(format!(
                "{} ILIKE {}",
                quoted_column,
                self.param(condition.data.clone())
            )),
            FilterOp::In => {
                if let Value::Array(values) = &condition.data {
                    if values.is_empty() {
                        return Ok("1=0".to_string());
                    }
                    let params: Vec<String> =
                        values.iter().map(|v| self.param(v.clone())).collect();
                    Ok(format!("{} IN ({})", quoted_column, params.join(", ")))
                } else {
                    Ok(format!(
                        "{} = {}",
                        quoted_column,
                        self.param(condition.data.clone())
                    ))
                }
            }
            FilterOp::Between => {
                if let Value::Array(values) = &condition.data {
                    if values.len() != 2 {
                        return Err(FilterError::InvalidOperatorData(
                            "$between requires exactly 2 values".to_string(),
                        ));
                    }
                    Ok(format!(
                        "{} BETWEEN {} AND {}",
                        quoted_column,
                        self.param(values[0].clone()),
                        self.param(values[1].clone())
                    ))
                } else {
                    Err(FilterError::InvalidOperatorData(
                        "$between requires array with 2 values".to_string(),
                    ))
                }
            }
            FilterOp::And | FilterOp::Or | FilterOp::Not | FilterOp::Composed => {
                // Logical operators are handled during parsing
                Err(FilterError::UnsupportedOperator(format!(
                    "{:?} is not a field operator",
                    condition.operator
                )))
            }
        }
    }

    fn param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn implicit_equality() {
        let (sql, params) = FilterWhere::generate(&json!({"category": "Tops"}), 0).unwrap();
        assert_eq!(sql, "\"category\" = $1");
        assert_eq!(params, vec![json!("Tops")]);
    }

    #[test]
    fn range_operators() {
        let (sql, params) =
            FilterWhere::generate(&json!({"points": {"$gte": 50, "$lte": 150}}), 0).unwrap();
        assert_eq!(sql, "\"points\" >= $1 AND \"points\" <= $2");
        assert_eq!(params, vec![json!(50), json!(150)]);
    }

    #[test]
    fn or_of_ilike_conditions() {
        let (sql, params) = FilterWhere::generate(
            &json!({"$or": [
                {"title": {"$ilike": "%coat%"}},
                {"brand": {"$ilike": "%coat%"}}
            ]}),
            0,
        )
        .unwrap();
        assert_eq!(sql, "(\"title\" ILIKE $1) OR (\"brand\" ILIKE $2)");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn empty_in_never_matches() {
        let (sql, params) = FilterWhere::generate(&json!({"id": {"$in": []}}), 0).unwrap();
        assert_eq!(sql, "1=0");
        assert!(params.is_empty());
    }

    #[test]
    fn raw_string_where_is_rejected() {
        assert!(FilterWhere::validate(&json!("status = 'approved'")).is_err());
    }

    #[test]
    fn suspicious_column_name_is_rejected() {
        assert!(FilterWhere::generate(&json!({"points; DROP TABLE items": 1}), 0).is_err());
    }
}

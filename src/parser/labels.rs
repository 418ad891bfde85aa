use super::commands::RawLine;
use crate::error::{DebugError, Result};
use std::collections::HashMap;

/// Map every `LABEL` to the index of the instruction that declares it.
pub fn build_label_map(lines: &[RawLine]) -> Result<HashMap<String, usize>> {
    let mut map = HashMap::new();
    for (index, raw) in lines.iter().enumerate() {
        if raw.opcode() != "LABEL" {
            continue;
        }
        let Some(name) = raw.tokens.get(1) else {
            return Err(DebugError::Program {
                line: raw.line,
                message: "LABEL without a name".to_string(),
            });
        };
        if map.insert(name.clone(), index).is_some() {
            return Err(DebugError::Program {
                line: raw.line,
                message: format!("label {name:?} declared twice"),
            });
        }
    }
    Ok(map)
}

use cgswap::core::models::bead::SecondaryStructure;
use cgswap::engine::config::Substitution;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid substitution '{0}'. Expected 'IDX:RES[:SS]' (e.g., '3:ALA' or '3:ALA:H').")]
    InvalidSubstitutionFormat(String),

    #[error("Invalid residue index '{0}'. Residue indices are positive integers.")]
    InvalidResidueIndex(String),

    #[error("Invalid secondary structure '{0}'. Expected one of F, E, H, 1, 2, 3, T, S, C.")]
    InvalidStructure(String),

    #[error("Component '{component}' cannot be empty in '{text}'.")]
    EmptyComponent {
        component: &'static str,
        text: String,
    },
}

/// Parses `IDX:RES[:SS]`; the structure defaults to coil.
pub fn parse_substitution(text: &str) -> Result<Substitution, ParseError> {
    let parts: Vec<&str> = text.split(':').map(str::trim).collect();
    let (index, name, structure) = match parts.as_slice() {
        [index, name] => (*index, *name, None),
        [index, name, structure] => (*index, *name, Some(*structure)),
        _ => return Err(ParseError::InvalidSubstitutionFormat(text.to_string())),
    };

    if name.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "RES",
            text: text.to_string(),
        });
    }
    let index: usize = index
        .parse()
        .ok()
        .filter(|&i| i > 0)
        .ok_or_else(|| ParseError::InvalidResidueIndex(index.to_string()))?;
    let structure = match structure {
        None | Some("") => SecondaryStructure::default(),
        Some(code) => code
            .parse()
            .map_err(|_| ParseError::InvalidStructure(code.to_string()))?,
    };

    Ok(Substitution::new(index, name, structure))
}

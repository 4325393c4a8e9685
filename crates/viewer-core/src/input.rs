#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("no page number entered")]
    Empty,
    #[error("\"{0}\" is not a page number")]
    NotANumber(String),
    #[error("page {page} does not exist (document has {page_count} pages)")]
    PageOutOfRange { page: i64, page_count: u32 },
}

/// Parses a one-based page number typed by the user into a zero-based index.
pub fn parse_page_number(text: &str, page_count: u32) -> Result<u32, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    let page: i64 = trimmed.parse().map_err(|_| InputError::NotANumber(trimmed.to_owned()))?;
    if page < 1 || page > i64::from(page_count) {
        return Err(InputError::PageOutOfRange { page, page_count });
    }

    Ok((page - 1) as u32)
}

/// Rotation angles offered by the rotate prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationChoice {
    Quarter,
    Half,
    ThreeQuarters,
}

impl RotationChoice {
    pub const ALL: [RotationChoice; 3] =
        [RotationChoice::Quarter, RotationChoice::Half, RotationChoice::ThreeQuarters];

    pub fn degrees(self) -> i32 {
        match self {
            RotationChoice::Quarter => 90,
            RotationChoice::Half => 180,
            RotationChoice::ThreeQuarters => 270,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RotationChoice::Quarter => "90°",
            RotationChoice::Half => "180°",
            RotationChoice::ThreeQuarters => "270°",
        }
    }
}

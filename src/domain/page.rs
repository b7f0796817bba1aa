/// LIMIT/OFFSET window over an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page{
    pub limit: i64,
    pub offset: i64
}

impl Page {
    pub fn new(limit: i64, offset: i64) -> Result<Page, String>{
        if limit < 0 {
            return Err(format!("limit must not be negative, got {}", limit));
        }

        if offset < 0 {
            return Err(format!("offset must not be negative, got {}", offset));
        }

        Ok(Page{ limit, offset })
    }
}

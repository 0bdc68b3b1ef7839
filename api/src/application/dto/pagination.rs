use crate::application::errors::UseCaseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Builds a request from raw query values. A page that is not a positive
    /// integer is rejected; an unusable page size falls back to the default.
    pub fn parse(
        page: Option<&str>,
        page_size: Option<&str>,
        default_size: u32,
        max_size: u32,
    ) -> Result<Self, UseCaseError> {
        let page = match page.map(str::trim).filter(|p| !p.is_empty()) {
            None => 1,
            Some(raw) => match raw.parse::<u32>() {
                Ok(p) if p >= 1 => p,
                _ => return Err(UseCaseError::InvalidPage),
            },
        };
        let page_size = page_size
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|s| *s >= 1)
            .map(|s| s.min(max_size))
            .unwrap_or(default_size)
            .max(1);
        Ok(Self { page, page_size })
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    /// Page 1 always exists; any later page must start before `total`.
    pub fn ensure_within(&self, total: i64) -> Result<(), UseCaseError> {
        if self.page == 1 || self.offset() < total {
            Ok(())
        } else {
            Err(UseCaseError::InvalidPage)
        }
    }

    pub fn has_next(&self, total: i64) -> bool {
        self.offset() + self.limit() < total
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            request,
        }
    }

    pub fn next_page(&self) -> Option<u32> {
        self.request
            .has_next(self.total)
            .then_some(self.request.page + 1)
    }

    pub fn previous_page(&self) -> Option<u32> {
        (self.request.page > 1).then(|| self.request.page - 1)
    }
}

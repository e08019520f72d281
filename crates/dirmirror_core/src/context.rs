/// Depth bookkeeping for one directory visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlContext {
    pub depth: usize,
    pub max_depth: usize,
}

impl CrawlContext {
    pub fn root(max_depth: usize) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    /// Context for a subdirectory one level below this one.
    pub fn descend(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }

    /// A visit past `max_depth` must return without issuing any request.
    pub fn is_exhausted(&self) -> bool {
        self.depth > self.max_depth
    }
}

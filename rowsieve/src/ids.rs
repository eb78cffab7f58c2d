/// Control-id construction helpers shared by the field normalizer.
///
/// Ids are derived from the owning table's instance name and the field's
/// position in the configuration, so the same configuration always
/// produces the same ids.
#[derive(Debug, Clone)]
pub struct IdContext<'a> {
    pub instance: &'a str,
}

impl<'a> IdContext<'a> {
    pub fn new(instance: &'a str) -> Self {
        Self { instance }
    }

    /// Base id for a field's single input control.
    pub fn field(&self, index: usize) -> String {
        format!("{}_{}", self.instance, index)
    }

    /// Id for a range field's minimum-bound input.
    pub fn min(&self, index: usize) -> String {
        format!("{}_{}_min", self.instance, index)
    }

    /// Id for a range field's maximum-bound input.
    pub fn max(&self, index: usize) -> String {
        format!("{}_{}_max", self.instance, index)
    }

    /// Id for a field's operator-selector control.
    pub fn advanced(&self, index: usize) -> String {
        format!("{}_{}_advanced", self.instance, index)
    }
}

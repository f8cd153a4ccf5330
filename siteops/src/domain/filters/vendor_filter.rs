use super::{field_matches, name_matches, RecordFilter};
use crate::domain::Vendor;

/// Filters for the vendor list: name search plus exact company.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VendorFilter {
    pub name: String,
    pub company: String,
}

impl RecordFilter<Vendor> for VendorFilter {
    fn matches(&self, record: &Vendor) -> bool {
        name_matches(&self.name, &record.name) && field_matches(&self.company, &record.company)
    }

    fn is_active(&self) -> bool {
        !self.name.is_empty() || !self.company.is_empty()
    }
}

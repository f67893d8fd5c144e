use crate::domain::model::CountryRecord;
use crate::utils::error::Result;

/// 數據來源 (固定檔案或使用者上傳)
///
/// Implementations return records with country names already normalized.
pub trait RecordSource {
    fn load(&self) -> Result<Vec<CountryRecord>>;

    /// Short human-readable name for logs.
    fn describe(&self) -> String;
}

impl RecordSource for Vec<CountryRecord> {
    fn load(&self) -> Result<Vec<CountryRecord>> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory table ({} rows)", self.len())
    }
}

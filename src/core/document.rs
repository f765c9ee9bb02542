use crate::adapters::local::LocalStorage;
use crate::config::toml_config::DEFAULT_INDENT;
use crate::core::codec;
use crate::core::validator;
use crate::domain::model::{SubjectDetails, Usf};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Restore the previous contents when a load fails part way.
    pub rollback_on_failure: bool,
    /// Run `validate()` once all fields are extracted.
    pub validate: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            rollback_on_failure: false,
            validate: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    pub indent: usize,
    /// Create missing parent directories instead of failing the save.
    pub create_missing_dirs: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            create_missing_dirs: false,
        }
    }
}

impl Usf {
    /// 從檔案載入並建立新的文件
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut usf = Self::default();
        usf.load_from_file(path)?;
        Ok(usf)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let mut usf = Self::default();
        usf.load_json_str(text, LoadOptions::default())?;
        Ok(usf)
    }

    /// 從檔案載入 USF 資料
    ///
    /// Fields are written in the order `version`, `subjects`, `periods`,
    /// `timetable`. A failure leaves whatever was extracted before it in
    /// place, including data that failed validation.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.load_from(&LocalStorage::default(), path.as_ref(), LoadOptions::default())
    }

    pub fn load_from<S: Storage + ?Sized>(
        &mut self,
        storage: &S,
        path: &Path,
        options: LoadOptions,
    ) -> Result<()> {
        tracing::debug!("Loading USF document from {}", path.display());

        let content = storage.read_file(path).map_err(|e| {
            tracing::error!("Failed to open file {}: {}", path.display(), e);
            e
        })?;

        self.load_json_bytes(&content, options)?;
        tracing::info!(
            "✅ Loaded {} subjects, {} periods, {} timetable entries from {}",
            self.subjects.len(),
            self.periods.len(),
            self.timetable.len(),
            path.display()
        );
        Ok(())
    }

    pub fn load_json_str(&mut self, text: &str, options: LoadOptions) -> Result<()> {
        self.load_json_bytes(text.as_bytes(), options)
    }

    /// Like `load_json_str`; bytes that are not UTF-8 fail as a `ParseError`.
    pub fn load_json_bytes(&mut self, bytes: &[u8], options: LoadOptions) -> Result<()> {
        let snapshot = options.rollback_on_failure.then(|| self.clone());

        let result = self.populate(bytes, options.validate);
        if result.is_err() {
            if let Some(previous) = snapshot {
                tracing::debug!("Load failed, restoring previous document");
                *self = previous;
            }
        }
        result
    }

    fn populate(&mut self, bytes: &[u8], validate: bool) -> Result<()> {
        let value = codec::parse_value(bytes)?;
        let object = codec::as_object(&value)?;

        self.version = codec::required_field(object, "version")?;
        self.subjects = codec::required_field(object, "subjects")?;
        self.periods = codec::required_field(object, "periods")?;
        self.timetable = codec::required_field(object, "timetable")?;

        if validate {
            self.validate().map_err(|e| {
                tracing::error!("Invalid data format in USF file");
                e
            })?;
        }
        Ok(())
    }

    /// 保存 USF 資料到檔案 (不做驗證)
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_to(&LocalStorage::default(), path.as_ref(), SaveOptions::default())
    }

    pub fn save_to<S: Storage + ?Sized>(
        &self,
        storage: &S,
        path: &Path,
        options: SaveOptions,
    ) -> Result<()> {
        let json = codec::to_json_string(self, options.indent)?;

        if options.create_missing_dirs {
            storage.create_parent_dirs(path).map_err(|e| {
                tracing::error!("Failed to create directories for {}: {}", path.display(), e);
                e
            })?;
        }

        storage.write_file(path, json.as_bytes()).map_err(|e| {
            tracing::error!("Failed to open file {}: {}", path.display(), e);
            e
        })?;

        tracing::debug!("Saved USF document ({} bytes) to {}", json.len(), path.display());
        Ok(())
    }

    pub fn to_json_string(&self) -> Result<String> {
        codec::to_json_string(self, DEFAULT_INDENT)
    }

    /// Inserts or replaces a subject. Last write wins.
    pub fn add_subject(&mut self, name: impl Into<String>, details: SubjectDetails) {
        self.subjects.insert(name.into(), details);
    }

    /// Appends `[day, week_type, subject, period]` without checking it.
    pub fn add_schedule_entry(
        &mut self,
        day: i32,
        week_type: impl Into<String>,
        subject: impl Into<String>,
        period: i32,
    ) {
        self.timetable.push(vec![
            day.to_string(),
            week_type.into(),
            subject.into(),
            period.to_string(),
        ]);
    }

    /// 校驗文件資料：先檢查 periods，再檢查 timetable
    pub fn validate(&self) -> Result<()> {
        if let Err(e) = validator::validate_periods(&self.periods) {
            tracing::error!("Invalid periods data");
            return Err(e);
        }

        if let Err(e) =
            validator::validate_timetable(&self.timetable, &self.subjects, self.periods.len())
        {
            tracing::error!("Invalid timetable data");
            return Err(e);
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl Validate for Usf {
    fn validate(&self) -> Result<()> {
        Usf::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::WeekType;
    use crate::utils::error::{UsfError, ValidationErrorKind};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[derive(Default)]
    struct MemoryStorage {
        files: RefCell<HashMap<PathBuf, Vec<u8>>>,
    }

    impl Storage for MemoryStorage {
        fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                UsfError::io(
                    path,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
                )
            })
        }

        fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), data.to_vec());
            Ok(())
        }
    }

    fn details(teacher: &str, room: &str) -> SubjectDetails {
        let mut details = SubjectDetails::new();
        details.insert("teacher".to_string(), teacher.to_string());
        details.insert("room".to_string(), room.to_string());
        details
    }

    fn sample() -> Usf {
        let mut usf = Usf::default();
        usf.periods.push(("08:00".to_string(), "08:45".to_string()));
        usf.add_subject("Math", details("A", "101"));
        usf.add_schedule_entry(1, "all", "Math", 1);
        usf
    }

    #[test]
    fn test_add_schedule_entry_stores_strings() {
        let mut usf = sample();
        usf.add_schedule_entry(2, WeekType::Odd, "Math", 1);

        assert_eq!(usf.timetable[1], vec!["2", "odd", "Math", "1"]);
        assert!(usf.validate().is_ok());
    }

    #[test]
    fn test_add_schedule_entry_does_not_validate() {
        let mut usf = sample();
        usf.add_schedule_entry(9, "sometimes", "Ghost", 42);

        assert_eq!(usf.timetable.len(), 2);
        assert!(!usf.is_valid());
    }

    #[test]
    fn test_add_subject_overwrites() {
        let mut usf = sample();
        usf.add_subject("Math", details("B", "202"));

        assert_eq!(usf.subjects.len(), 1);
        assert_eq!(usf.subject("Math").unwrap()["teacher"], "B");
    }

    #[test]
    fn test_validate_is_idempotent() {
        let good = sample();
        assert!(good.validate().is_ok());
        assert!(good.validate().is_ok());

        let mut bad = sample();
        bad.timetable[0][0] = "8".to_string();
        let first = bad.validate().unwrap_err().validation_kind();
        let second = bad.validate().unwrap_err().validation_kind();
        assert_eq!(first, Some(ValidationErrorKind::DayOutOfRange));
        assert_eq!(first, second);
    }

    #[test]
    fn test_periods_checked_before_timetable() {
        let mut usf = sample();
        usf.periods[0].1.clear();
        usf.timetable[0][1] = "weird".to_string();

        assert_eq!(
            usf.validate().unwrap_err().validation_kind(),
            Some(ValidationErrorKind::EmptyPeriodTime)
        );
    }

    #[test]
    fn test_save_then_load_through_storage() {
        let storage = MemoryStorage::default();
        let path = Path::new("week.json");
        let original = sample();

        original
            .save_to(&storage, path, SaveOptions::default())
            .unwrap();

        let mut loaded = Usf::default();
        loaded
            .load_from(&storage, path, LoadOptions::default())
            .unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_save_indent_option() {
        let storage = MemoryStorage::default();
        let path = Path::new("narrow.json");

        sample()
            .save_to(
                &storage,
                path,
                SaveOptions {
                    indent: 2,
                    ..SaveOptions::default()
                },
            )
            .unwrap();

        let text = String::from_utf8(storage.read_file(path).unwrap()).unwrap();
        assert!(text.starts_with("{\n  \"version\": 1,"));
    }

    #[test]
    fn test_partial_population_without_rollback() {
        let mut usf = sample();
        let result = usf.load_json_str(
            r#"{"version": 5, "subjects": {}, "periods": "not a list", "timetable": []}"#,
            LoadOptions::default(),
        );

        assert!(matches!(
            result,
            Err(UsfError::TypeMismatchError { ref field, .. }) if field == "periods"
        ));
        assert_eq!(usf.version, 5);
        assert!(usf.subjects.is_empty());
        // untouched because extraction stopped at periods
        assert_eq!(usf.periods.len(), 1);
        assert_eq!(usf.timetable.len(), 1);
    }

    #[test]
    fn test_rollback_restores_previous_document() {
        let original = sample();
        let mut usf = original.clone();
        let options = LoadOptions {
            rollback_on_failure: true,
            ..LoadOptions::default()
        };

        let result = usf.load_json_str(
            r#"{"version": 2, "subjects": {}, "periods": [], "timetable": [["1","all","Math","1"]]}"#,
            options,
        );

        assert_eq!(
            result.unwrap_err().validation_kind(),
            Some(ValidationErrorKind::UnknownSubjectReference)
        );
        assert_eq!(usf, original);
    }

    #[test]
    fn test_load_without_validation() {
        let mut usf = Usf::default();
        let options = LoadOptions {
            validate: false,
            ..LoadOptions::default()
        };

        usf.load_json_str(
            r#"{"version": 1, "subjects": {}, "periods": [], "timetable": [["8","weird","Ghost","3"]]}"#,
            options,
        )
        .unwrap();

        assert_eq!(usf.timetable.len(), 1);
        assert!(!usf.is_valid());
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let storage = MemoryStorage::default();
        let path = Path::new("latin1.json");
        storage
            .write_file(path, b"{\"version\": 1, \"subjects\": {\"\xff\": {}}}")
            .unwrap();

        let mut usf = Usf::default();
        let err = usf
            .load_from(&storage, path, LoadOptions::default())
            .unwrap_err();

        assert!(matches!(err, UsfError::ParseError(_)));
        assert_eq!(err.category(), crate::utils::error::ErrorCategory::Parse);
    }

    #[test]
    fn test_missing_storage_file() {
        let storage = MemoryStorage::default();
        let mut usf = Usf::default();

        let result = usf.load_from(&storage, Path::new("absent.json"), LoadOptions::default());
        assert!(matches!(result, Err(UsfError::IoError { .. })));
        assert_eq!(usf, Usf::default());
    }
}

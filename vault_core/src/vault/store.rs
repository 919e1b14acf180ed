use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::error::{VaultError, VaultResult};
use super::metadata::{normalize_edits, record_matches, FileStats, MetadataRecord, SIDECAR_SUFFIX};
use super::validation::{NameValidationConfig, NameValidator};

#[derive(Debug, Clone)]
pub struct FileVaultConfig {
    pub root: PathBuf,
    pub validation: NameValidationConfig,
}

impl Default for FileVaultConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("uploaded_documents"),
            validation: NameValidationConfig::default(),
        }
    }
}

/// Outcome of [`FileVault::provision_folders`]. Provisioning never fails as a
/// whole; per-folder problems are collected here instead.
#[derive(Debug, Default)]
pub struct ProvisionReport {
    pub created: Vec<String>,
    pub existing: Vec<String>,
    pub failed: Vec<(String, VaultError)>,
}

impl ProvisionReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Removal {
    Removed,
    Missing,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    pub file: Removal,
    pub sidecar: Removal,
}

#[derive(Debug, Clone, Serialize)]
pub struct FolderHits {
    pub folder: String,
    pub files: Vec<String>,
}

/// Directory-backed document store. Every call goes straight to disk; nothing
/// is cached between calls.
#[derive(Debug, Clone)]
pub struct FileVault {
    root: PathBuf,
    validator: NameValidator,
}

impl FileVault {
    pub fn new(config: FileVaultConfig) -> Self {
        let validator = NameValidator::new(config.validation);

        Self {
            root: config.root,
            validator,
        }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::new(FileVaultConfig {
            root: root.into(),
            ..Default::default()
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn provision_folders<I, S>(&self, folders: I) -> ProvisionReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = ProvisionReport::default();

        if let Err(e) = fs::create_dir_all(&self.root) {
            error!(root = %self.root.display(), error = %e, "Failed to create vault root");
            report
                .failed
                .push((self.root.display().to_string(), VaultError::io(&self.root, e)));
            return report;
        }

        for folder in folders {
            let folder = folder.as_ref();
            let path = match self.folder_path(folder) {
                Ok(path) => path,
                Err(e) => {
                    error!(folder, error = %e, "Refusing to provision folder");
                    report.failed.push((folder.to_string(), e));
                    continue;
                }
            };

            if path.is_dir() {
                report.existing.push(folder.to_string());
                continue;
            }

            match fs::create_dir_all(&path) {
                Ok(()) => report.created.push(folder.to_string()),
                Err(e) => {
                    error!(folder, error = %e, "Failed to create folder");
                    report.failed.push((folder.to_string(), VaultError::io(path, e)));
                }
            }
        }

        info!(
            created = report.created.len(),
            existing = report.existing.len(),
            failed = report.failed.len(),
            "Folder structure provisioned"
        );

        report
    }

    /// Writes `data` verbatim, replacing any file of the same name. An existing
    /// sidecar is left as it is.
    pub fn save_file(&self, folder: &str, file_name: &str, data: &[u8]) -> VaultResult<String> {
        self.validator.validate_upload_name(file_name)?;
        let dir = self.existing_folder(folder)?;
        let path = dir.join(file_name);

        let result = fs::File::create(&path).and_then(|mut file| {
            file.write_all(data)?;
            file.sync_all()
        });

        match result {
            Ok(()) => {
                info!(path = %path.display(), size = data.len(), "File saved");
                Ok(file_name.to_string())
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to save uploaded file");
                Err(VaultError::io(path, e))
            }
        }
    }

    pub fn save_metadata(
        &self,
        folder: &str,
        file_name: &str,
        record: &MetadataRecord,
    ) -> VaultResult<()> {
        let path = self.sidecar_path(folder, file_name)?;

        let result = write_pretty_json(&path, record);
        match &result {
            Ok(()) => info!(path = %path.display(), fields = record.len(), "Metadata saved"),
            Err(e) => error!(path = %path.display(), error = %e, "Failed to save metadata"),
        }
        result
    }

    /// Filesystem stats for the file overlaid with its sidecar, if any. Sidecar
    /// keys win over stat keys of the same name. An unreadable sidecar is
    /// logged and skipped.
    pub fn get_metadata(&self, folder: &str, file_name: &str) -> VaultResult<MetadataRecord> {
        let path = self.file_path(folder, file_name)?;

        let stats = match fs::metadata(&path) {
            Ok(stats) => stats,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "Failed to get file stats: file missing");
                return Err(VaultError::FileNotFound(display_name(folder, file_name)));
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to get file stats");
                return Err(VaultError::io(path, e));
            }
        };

        let mut metadata = FileStats::from_fs(file_name, &stats).into_record();

        match read_sidecar(&sidecar_of(&path)) {
            Ok(Some(custom)) => metadata.extend(custom),
            Ok(None) => {}
            Err(e) => error!(path = %path.display(), error = %e, "Failed to read metadata"),
        }

        Ok(metadata)
    }

    /// Every directory entry, sidecars and subfolders included, filtered on
    /// name only. A missing folder lists as empty.
    pub fn list_files(&self, folder: &str, query: Option<&str>) -> VaultResult<Vec<String>> {
        let dir = self.folder_path(folder)?;
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let needle = normalize_query(query);
        let files: Vec<String> = read_entry_names(&dir)?
            .into_iter()
            .filter(|name| match &needle {
                Some(needle) => name.to_lowercase().contains(needle),
                None => true,
            })
            .collect();

        debug!(folder, query = ?query, count = files.len(), "Listed files");
        Ok(files)
    }

    /// Regular, non-sidecar files whose name or metadata values contain the
    /// query, case-insensitively.
    pub fn search_files(&self, folder: &str, query: Option<&str>) -> VaultResult<Vec<String>> {
        let dir = self.folder_path(folder)?;
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let needle = normalize_query(query);
        let mut files = Vec::new();

        for name in read_entry_names(&dir)? {
            let path = dir.join(&name);
            if !path.is_file() || name.ends_with(SIDECAR_SUFFIX) {
                continue;
            }

            let matched = match &needle {
                None => true,
                Some(needle) if name.to_lowercase().contains(needle) => true,
                Some(needle) => match read_sidecar(&sidecar_of(&path)) {
                    Ok(Some(record)) => record_matches(&record, needle),
                    Ok(None) => false,
                    Err(e) => {
                        error!(file = %name, error = %e, "Failed to read metadata");
                        false
                    }
                },
            };

            if matched {
                files.push(name);
            }
        }

        debug!(folder, query = ?query, count = files.len(), "Searched files");
        Ok(files)
    }

    /// Runs [`search_files`](Self::search_files) over each folder in order and
    /// keeps the folders that had hits. Folders that fail are logged and skipped.
    pub fn search_vault<I, S>(&self, folders: I, query: Option<&str>) -> Vec<FolderHits>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        folders
            .into_iter()
            .filter_map(|folder| {
                let folder = folder.as_ref();
                match self.search_files(folder, query) {
                    Ok(files) if !files.is_empty() => Some(FolderHits {
                        folder: folder.to_string(),
                        files,
                    }),
                    Ok(_) => None,
                    Err(e) => {
                        error!(folder, error = %e, "Failed to search folder");
                        None
                    }
                }
            })
            .collect()
    }

    /// Removes the file and its sidecar independently. Absent targets are not
    /// an error, and a failed removal is reported rather than raised.
    pub fn delete_file(&self, folder: &str, file_name: &str) -> VaultResult<DeleteOutcome> {
        let path = self.file_path(folder, file_name)?;
        info!(path = %path.display(), "Trying to delete");

        let file = remove_if_present(&path, "main file");
        let sidecar = remove_if_present(&sidecar_of(&path), "metadata");

        Ok(DeleteOutcome { file, sidecar })
    }

    /// Replaces the sidecar with `edits`, minus the filesystem-derived keys.
    /// The file itself must exist.
    pub fn update_metadata(
        &self,
        folder: &str,
        file_name: &str,
        edits: MetadataRecord,
    ) -> VaultResult<MetadataRecord> {
        let path = self.file_path(folder, file_name)?;
        if !path.is_file() {
            return Err(VaultError::FileNotFound(display_name(folder, file_name)));
        }

        let record = normalize_edits(edits);
        self.save_metadata(folder, file_name, &record)?;
        Ok(record)
    }

    pub fn read_file(&self, folder: &str, file_name: &str) -> VaultResult<Vec<u8>> {
        let path = self.file_path(folder, file_name)?;
        if !path.is_file() {
            return Err(VaultError::FileNotFound(display_name(folder, file_name)));
        }

        fs::read(&path).map_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to read file");
            VaultError::io(path, e)
        })
    }

    fn folder_path(&self, folder: &str) -> VaultResult<PathBuf> {
        self.validator.validate_folder(folder)?;
        Ok(self.root.join(folder))
    }

    fn existing_folder(&self, folder: &str) -> VaultResult<PathBuf> {
        let dir = self.folder_path(folder)?;
        if !dir.is_dir() {
            warn!(folder, "Target folder does not exist");
            return Err(VaultError::FolderNotFound(folder.to_string()));
        }
        Ok(dir)
    }

    fn file_path(&self, folder: &str, file_name: &str) -> VaultResult<PathBuf> {
        self.validator.validate_filename(file_name)?;
        Ok(self.folder_path(folder)?.join(file_name))
    }

    fn sidecar_path(&self, folder: &str, file_name: &str) -> VaultResult<PathBuf> {
        Ok(sidecar_of(&self.file_path(folder, file_name)?))
    }
}

fn sidecar_of(path: &Path) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    raw.push(SIDECAR_SUFFIX);
    PathBuf::from(raw)
}

fn display_name(folder: &str, file_name: &str) -> String {
    format!("{folder}/{file_name}")
}

fn normalize_query(query: Option<&str>) -> Option<String> {
    query.filter(|q| !q.is_empty()).map(str::to_lowercase)
}

fn read_entry_names(dir: &Path) -> VaultResult<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        error!(folder = %dir.display(), error = %e, "Failed to list files");
        VaultError::io(dir, e)
    })?;

    Ok(entries
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect())
}

fn read_sidecar(path: &Path) -> VaultResult<Option<MetadataRecord>> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(VaultError::io(path, e)),
    };

    serde_json::from_slice::<MetadataRecord>(&raw)
        .map(Some)
        .map_err(|source| VaultError::Metadata {
            path: path.to_path_buf(),
            source,
        })
}

fn write_pretty_json(path: &Path, record: &MetadataRecord) -> VaultResult<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record
        .serialize(&mut serializer)
        .map_err(|source| VaultError::Metadata {
            path: path.to_path_buf(),
            source,
        })?;

    fs::write(path, buf).map_err(|e| VaultError::io(path, e))
}

fn remove_if_present(path: &Path, what: &str) -> Removal {
    if !path.exists() {
        info!(path = %path.display(), "{} not found", what);
        return Removal::Missing;
    }

    match fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "Deleted {}", what);
            Removal::Removed
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to delete {}", what);
            Removal::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::ValidationError;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn create_test_vault() -> (FileVault, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let vault = FileVault::with_root(temp_dir.path().join("vault"));
        let report = vault.provision_folders(["Customers", "Documents/Pictures"]);
        assert!(report.is_complete());
        (vault, temp_dir)
    }

    fn record(value: Value) -> MetadataRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn sorted(mut names: Vec<String>) -> Vec<String> {
        names.sort();
        names
    }

    #[test]
    fn test_provision_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let vault = FileVault::with_root(temp_dir.path().join("vault"));

        let first = vault.provision_folders(["Documents/Pictures", "Documents", "Customers"]);
        assert!(first.is_complete());
        assert_eq!(first.created.len(), 3 - first.existing.len());
        assert!(vault.root().join("Documents/Pictures").is_dir());

        fs::write(vault.root().join("Customers/keep.txt"), b"x").unwrap();

        let second = vault.provision_folders(["Documents/Pictures", "Documents", "Customers"]);
        assert!(second.is_complete());
        assert!(second.created.is_empty());
        assert_eq!(second.existing.len(), 3);
        assert!(vault.root().join("Customers/keep.txt").exists());
    }

    #[test]
    fn test_provision_reports_invalid_folders() {
        let temp_dir = TempDir::new().unwrap();
        let vault = FileVault::with_root(temp_dir.path());

        let report = vault.provision_folders(["Customers", "../escape"]);
        assert_eq!(report.created, vec!["Customers".to_string()]);
        assert_eq!(report.failed.len(), 1);
        assert!(!temp_dir.path().parent().unwrap().join("escape").exists());
    }

    #[test]
    fn test_save_file_overwrites_and_keeps_sidecar() {
        let (vault, _temp_dir) = create_test_vault();

        assert_eq!(vault.save_file("Customers", "a.txt", b"first").unwrap(), "a.txt");
        vault
            .save_metadata("Customers", "a.txt", &record(json!({"Author": "Ada"})))
            .unwrap();

        vault.save_file("Customers", "a.txt", b"second").unwrap();

        assert_eq!(vault.read_file("Customers", "a.txt").unwrap(), b"second");
        let metadata = vault.get_metadata("Customers", "a.txt").unwrap();
        assert_eq!(metadata["Author"], json!("Ada"));
    }

    #[test]
    fn test_save_file_rejects_bad_targets() {
        let (vault, _temp_dir) = create_test_vault();

        assert!(matches!(
            vault.save_file("Customers", "../evil.txt", b"x"),
            Err(VaultError::Validation(ValidationError::InvalidFilename { .. }))
        ));
        assert!(matches!(
            vault.save_file("../Customers", "a.txt", b"x"),
            Err(VaultError::Validation(ValidationError::InvalidFolder { .. }))
        ));
        assert!(matches!(
            vault.save_file("Customers", "a.txt.json", b"{}"),
            Err(VaultError::Validation(ValidationError::SidecarFilename { .. }))
        ));
        assert!(matches!(
            vault.save_file("Projects", "a.txt", b"x"),
            Err(VaultError::FolderNotFound(_))
        ));
    }

    #[test]
    fn test_metadata_round_trip() {
        let (vault, _temp_dir) = create_test_vault();
        vault.save_file("Customers", "contract.pdf", &[0u8; 2048]).unwrap();

        let custom = record(json!({
            "Author": "Jane",
            "Tags": ["legal", "2024"],
            "File Name": "renamed.pdf",
        }));
        vault.save_metadata("Customers", "contract.pdf", &custom).unwrap();

        let metadata = vault.get_metadata("Customers", "contract.pdf").unwrap();
        assert_eq!(metadata["Author"], json!("Jane"));
        assert_eq!(metadata["Tags"], json!(["legal", "2024"]));
        assert_eq!(metadata["File Name"], json!("renamed.pdf"));
        assert_eq!(metadata["Size (KB)"], json!(2.0));
        assert!(metadata["Created"].as_f64().unwrap() > 0.0);
        assert!(metadata["Modified"].as_f64().unwrap() > 0.0);

        let raw = fs::read_to_string(vault.root().join("Customers/contract.pdf.json")).unwrap();
        assert!(raw.contains("\n    \"Author\""));
    }

    #[test]
    fn test_get_metadata_without_sidecar() {
        let (vault, _temp_dir) = create_test_vault();
        vault.save_file("Customers", "plain.txt", b"hello").unwrap();

        let metadata = vault.get_metadata("Customers", "plain.txt").unwrap();
        assert_eq!(metadata.len(), 4);
        assert_eq!(metadata["File Name"], json!("plain.txt"));
        assert_eq!(metadata["Size (KB)"], json!(0.0));
    }

    #[test]
    fn test_get_metadata_with_malformed_sidecar() {
        let (vault, _temp_dir) = create_test_vault();
        vault.save_file("Customers", "broken.txt", b"data").unwrap();
        fs::write(vault.root().join("Customers/broken.txt.json"), b"{not json").unwrap();

        let metadata = vault.get_metadata("Customers", "broken.txt").unwrap();
        assert_eq!(metadata.len(), 4);
        assert_eq!(metadata["File Name"], json!("broken.txt"));
    }

    #[test]
    fn test_get_metadata_missing_file() {
        let (vault, _temp_dir) = create_test_vault();

        assert!(matches!(
            vault.get_metadata("Customers", "ghost.pdf"),
            Err(VaultError::FileNotFound(name)) if name == "Customers/ghost.pdf"
        ));
    }

    #[test]
    fn test_list_files_includes_every_entry() {
        let (vault, _temp_dir) = create_test_vault();
        vault.save_file("Documents", "Invoice.pdf", b"x").unwrap();
        vault
            .save_metadata("Documents", "Invoice.pdf", &record(json!({"Owner": "Bob"})))
            .unwrap();

        let all = sorted(vault.list_files("Documents", None).unwrap());
        assert_eq!(all, vec!["Invoice.pdf", "Invoice.pdf.json", "Pictures"]);

        let filtered = sorted(vault.list_files("Documents", Some("INVOICE")).unwrap());
        assert_eq!(filtered, vec!["Invoice.pdf", "Invoice.pdf.json"]);

        // metadata is not consulted
        assert!(vault.list_files("Documents", Some("bob")).unwrap().is_empty());
        assert_eq!(vault.list_files("Documents", Some("")).unwrap().len(), 3);
    }

    #[test]
    fn test_missing_folder_lists_empty() {
        let (vault, _temp_dir) = create_test_vault();

        assert!(vault.list_files("Projects", None).unwrap().is_empty());
        assert!(vault.search_files("Projects", Some("x")).unwrap().is_empty());
        assert!(vault.search_files("Documents/Pending Proposal", None).unwrap().is_empty());
    }

    #[test]
    fn test_search_files_by_name_and_metadata() {
        let (vault, _temp_dir) = create_test_vault();
        vault.save_file("Customers", "invoice_2024.pdf", b"a").unwrap();
        vault.save_file("Customers", "report.pdf", b"b").unwrap();
        vault
            .save_metadata(
                "Customers",
                "report.pdf",
                &record(json!({"Tags": ["urgent", "finance"]})),
            )
            .unwrap();

        assert_eq!(
            vault.search_files("Customers", Some("finance")).unwrap(),
            vec!["report.pdf"]
        );
        assert_eq!(
            vault.search_files("Customers", Some("invoice")).unwrap(),
            vec!["invoice_2024.pdf"]
        );
        assert_eq!(
            sorted(vault.search_files("Customers", Some("")).unwrap()),
            vec!["invoice_2024.pdf", "report.pdf"]
        );
        assert_eq!(
            sorted(vault.search_files("Customers", None).unwrap()),
            vec!["invoice_2024.pdf", "report.pdf"]
        );
        assert_eq!(
            vault.search_files("Customers", Some("URGENT")).unwrap(),
            vec!["report.pdf"]
        );
        // keys are not searched
        assert!(vault.search_files("Customers", Some("tags")).unwrap().is_empty());
    }

    #[test]
    fn test_search_skips_sidecars_and_folders() {
        let (vault, _temp_dir) = create_test_vault();
        vault.save_file("Documents", "notes.txt", b"n").unwrap();
        vault
            .save_metadata("Documents", "notes.txt", &record(json!({"Author": "zed"})))
            .unwrap();
        fs::write(vault.root().join("Documents/bad.txt"), b"b").unwrap();
        fs::write(vault.root().join("Documents/bad.txt.json"), b"[oops").unwrap();

        let all = sorted(vault.search_files("Documents", None).unwrap());
        assert_eq!(all, vec!["bad.txt", "notes.txt"]);

        // a malformed sidecar never matches but does not abort the search
        assert_eq!(vault.search_files("Documents", Some("zed")).unwrap(), vec!["notes.txt"]);
        assert!(vault.search_files("Documents", Some("oops")).unwrap().is_empty());
    }

    #[test]
    fn test_search_vault() {
        let (vault, _temp_dir) = create_test_vault();
        vault.save_file("Customers", "acme.pdf", b"a").unwrap();
        vault.save_file("Documents/Pictures", "logo.png", b"p").unwrap();
        vault
            .save_metadata("Documents/Pictures", "logo.png", &record(json!({"Customer Name": "ACME"})))
            .unwrap();

        let hits = vault.search_vault(["Documents", "Documents/Pictures", "Customers", "Projects"], Some("acme"));
        let folders: Vec<&str> = hits.iter().map(|h| h.folder.as_str()).collect();
        assert_eq!(folders, vec!["Documents/Pictures", "Customers"]);
        assert_eq!(hits[0].files, vec!["logo.png"]);
        assert_eq!(hits[1].files, vec!["acme.pdf"]);
    }

    #[test]
    fn test_delete_file_removes_both() {
        let (vault, _temp_dir) = create_test_vault();
        vault.save_file("Customers", "gone.txt", b"x").unwrap();
        vault
            .save_metadata("Customers", "gone.txt", &record(json!({"Owner": "me"})))
            .unwrap();

        let outcome = vault.delete_file("Customers", "gone.txt").unwrap();
        assert_eq!(
            outcome,
            DeleteOutcome {
                file: Removal::Removed,
                sidecar: Removal::Removed
            }
        );
        assert!(!vault.root().join("Customers/gone.txt").exists());
        assert!(!vault.root().join("Customers/gone.txt.json").exists());
    }

    #[test]
    fn test_delete_missing_file_touches_nothing_else() {
        let (vault, _temp_dir) = create_test_vault();
        vault.save_file("Customers", "stay.txt", b"x").unwrap();

        let outcome = vault.delete_file("Customers", "ghost.txt").unwrap();
        assert_eq!(outcome.file, Removal::Missing);
        assert_eq!(outcome.sidecar, Removal::Missing);
        assert!(vault.root().join("Customers/stay.txt").exists());

        let sidecar_only = vault.delete_file("Customers", "stay.txt").unwrap();
        assert_eq!(sidecar_only.file, Removal::Removed);
        assert_eq!(sidecar_only.sidecar, Removal::Missing);
    }

    #[test]
    fn test_update_metadata() {
        let (vault, _temp_dir) = create_test_vault();
        vault.save_file("Customers", "deal.docx", b"d").unwrap();

        let edits = record(json!({
            "File Name": "deal.docx",
            "Size (KB)": 0.0,
            "Created": 1.0,
            "Author": "Lin",
            "Tags": "sales, q3",
        }));
        let saved = vault.update_metadata("Customers", "deal.docx", edits).unwrap();
        assert_eq!(saved.len(), 2);

        let metadata = vault.get_metadata("Customers", "deal.docx").unwrap();
        assert_eq!(metadata["Author"], json!("Lin"));
        assert_eq!(metadata["Tags"], json!(["sales", "q3"]));
        assert_eq!(metadata["File Name"], json!("deal.docx"));

        assert!(matches!(
            vault.update_metadata("Customers", "nope.docx", MetadataRecord::new()),
            Err(VaultError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_read_file_missing() {
        let (vault, _temp_dir) = create_test_vault();

        assert!(matches!(
            vault.read_file("Customers", "none.bin"),
            Err(VaultError::FileNotFound(_))
        ));
        assert!(matches!(
            vault.read_file("Documents", "Pictures"),
            Err(VaultError::FileNotFound(_))
        ));
    }
}

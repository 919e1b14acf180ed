use serde::Serialize;

pub const DOCUMENTS_FOLDER: &str = "Documents";

pub const DOCUMENT_CATEGORIES: [&str; 5] = [
    "Other Documents",
    "Purchase Invoice",
    "By Project",
    "Pending Proposal",
    "Pictures",
];

pub const ENTITY_FOLDERS: [&str; 4] = ["Customers", "Projects", "Employees", "AdvancedSampleViews"];

/// The stock folder set, in the order searches walk it.
pub fn default_folders() -> Vec<String> {
    std::iter::once(DOCUMENTS_FOLDER.to_string())
        .chain(
            DOCUMENT_CATEGORIES
                .iter()
                .map(|category| format!("{DOCUMENTS_FOLDER}/{category}")),
        )
        .chain(ENTITY_FOLDERS.iter().map(|folder| folder.to_string()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub label: String,
    pub folder: String,
}

impl Category {
    pub fn new(folder: impl Into<String>) -> Self {
        let folder = folder.into();
        let label = folder
            .rsplit('/')
            .next()
            .unwrap_or(folder.as_str())
            .to_string();
        Self { label, folder }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn from_folders<I, S>(folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: folders.into_iter().map(Category::new).collect(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn folders(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.folder.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

use crate::models::{Lead, GENERAL_INDUSTRY, HIGH_POTENTIAL_TAG};

/// Score at or above which a lead is tagged "High Potential".
pub const DEFAULT_HIGH_POTENTIAL_THRESHOLD: i32 = 50;

/// Ordered category -> position keywords table.
///
/// Categories are evaluated in declaration order and the first category with
/// any matching keyword wins.
#[derive(Debug, Clone, PartialEq)]
pub struct IndustryTable {
    categories: Vec<(String, Vec<String>)>,
}

impl Default for IndustryTable {
    fn default() -> Self {
        Self::new(vec![
            ("Tech", &["software", "developer", "engineer"][..]),
            ("Finance", &["finance", "bank", "investment"][..]),
            ("Retail", &["retail", "store", "shop"][..]),
            ("Healthcare", &["health", "medical", "clinic"][..]),
        ])
    }
}

impl IndustryTable {
    pub fn new(categories: Vec<(&str, &[&str])>) -> Self {
        Self {
            categories: categories
                .into_iter()
                .map(|(category, keywords)| {
                    (
                        category.to_string(),
                        keywords.iter().map(|k| k.to_lowercase()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// First category whose keywords occur in `text`, case-insensitively.
    pub fn categorize(&self, text: &str) -> Option<&str> {
        let text = text.to_lowercase();
        self.categories
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k.as_str())))
            .map(|(category, _)| category.as_str())
    }
}

/// How industry tags are assigned for a run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaggingMode {
    /// Categorize uncategorized leads with the [`IndustryTable`].
    #[default]
    Table,
    /// Tag leads whose company contains a caller-supplied keyword.
    Keyword(String),
}

impl TaggingMode {
    /// Keyword mode when a non-blank keyword is given, table mode otherwise.
    pub fn from_keyword(keyword: Option<&str>) -> Self {
        match keyword.map(str::trim) {
            Some(k) if !k.is_empty() => Self::Keyword(k.to_string()),
            _ => Self::Table,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LeadTagger {
    table: IndustryTable,
    high_potential_threshold: i32,
}

impl Default for LeadTagger {
    fn default() -> Self {
        Self::new(IndustryTable::default(), DEFAULT_HIGH_POTENTIAL_THRESHOLD)
    }
}

impl LeadTagger {
    pub fn new(table: IndustryTable, high_potential_threshold: i32) -> Self {
        Self {
            table,
            high_potential_threshold,
        }
    }

    pub fn tag(&self, leads: &mut [Lead], mode: &TaggingMode) {
        match mode {
            TaggingMode::Table => self.tag_industry(leads),
            TaggingMode::Keyword(keyword) => self.tag_by_keyword(leads, keyword),
        }
    }

    /// Assigns an industry to every lead whose industry is empty or "General"
    /// by scanning its position against the table. Unmatched leads are set to
    /// "General"; leads with any other industry are left untouched.
    pub fn tag_industry(&self, leads: &mut [Lead]) {
        let mut categorized = 0;
        for lead in leads
            .iter_mut()
            .filter(|lead| lead.industry.is_empty() || lead.industry == GENERAL_INDUSTRY)
        {
            lead.industry = match self.table.categorize(&lead.position) {
                Some(category) => {
                    categorized += 1;
                    category.to_string()
                }
                None => GENERAL_INDUSTRY.to_string(),
            };
        }
        tracing::debug!("Industry tagging categorized {} leads", categorized);
    }

    /// Adds "<keyword> Industry" to every lead whose company contains
    /// `keyword`, case-insensitively. A blank keyword tags nothing.
    pub fn tag_by_keyword(&self, leads: &mut [Lead], keyword: &str) {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return;
        }
        let needle = keyword.to_lowercase();
        let tag = format!("{} Industry", keyword);

        let mut tagged = 0;
        for lead in leads
            .iter_mut()
            .filter(|lead| lead.company.to_lowercase().contains(&needle))
        {
            lead.add_tag(tag.as_str());
            tagged += 1;
        }
        tracing::debug!("Keyword '{}' tagged {} leads", keyword, tagged);
    }

    /// Tags every lead scoring at or above the threshold as "High Potential".
    pub fn add_tag_high_potential(&self, leads: &mut [Lead]) {
        for lead in leads
            .iter_mut()
            .filter(|lead| lead.score >= self.high_potential_threshold)
        {
            lead.add_tag(HIGH_POTENTIAL_TAG);
        }
    }
}

//! Read-only derived views over a parsed resume.

use serde::Serialize;

use crate::resume::date::{format_date_range, Locale};
use crate::resume::models::{
    Basics, Certificate, Education, Interest, Language, Profile, Project, Resume, Skill, Work,
};

const DEVELOPMENT_MARKERS: &[&str] = &["backend", "frontend", "développement"];
const INFRASTRUCTURE_MARKERS: &[&str] = &["devops", "infrastructure"];
// stem: catches "méthodologie" and "méthodologies"
const OTHER_MARKERS: &[&str] = &["outil", "méthodolog"];

/// Keyword lists of the first skill group matching each display category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillsByCategory {
    pub development: Vec<String>,
    pub infrastructure: Vec<String>,
    pub other: Vec<String>,
}

/// A work entry with its period already formatted for display.
#[derive(Debug, Clone, Serialize)]
pub struct WorkPeriod<'a> {
    pub name: &'a str,
    pub position: &'a str,
    pub period: String,
}

/// Borrowing view over an immutable [`Resume`].
#[derive(Debug, Clone, Copy)]
pub struct ResumeView<'a> {
    resume: &'a Resume,
}

impl<'a> ResumeView<'a> {
    pub fn new(resume: &'a Resume) -> Self {
        Self { resume }
    }

    pub fn basics(&self) -> &'a Basics {
        &self.resume.content.basics
    }

    pub fn work(&self) -> &'a [Work] {
        &self.resume.content.work
    }

    pub fn education(&self) -> &'a [Education] {
        &self.resume.content.education
    }

    pub fn skills(&self) -> &'a [Skill] {
        &self.resume.content.skills
    }

    pub fn languages(&self) -> &'a [Language] {
        &self.resume.content.languages
    }

    pub fn projects(&self) -> &'a [Project] {
        &self.resume.content.projects
    }

    pub fn interests(&self) -> &'a [Interest] {
        &self.resume.content.interests
    }

    pub fn certificates(&self) -> &'a [Certificate] {
        &self.resume.content.certificates
    }

    /// First profile whose network equals `network`, ignoring case.
    pub fn profile(&self, network: &str) -> Option<&'a Profile> {
        let wanted = network.to_lowercase();
        self.basics()
            .profiles
            .iter()
            .find(|p| p.network.to_lowercase() == wanted)
    }

    /// Classifies skill groups by substring of their name.
    ///
    /// Each category takes the keywords of the FIRST matching group only;
    /// later matches are ignored and groups may land in several categories.
    pub fn skills_by_category(&self) -> SkillsByCategory {
        SkillsByCategory {
            development: self.first_group_keywords(DEVELOPMENT_MARKERS),
            infrastructure: self.first_group_keywords(INFRASTRUCTURE_MARKERS),
            other: self.first_group_keywords(OTHER_MARKERS),
        }
    }

    fn first_group_keywords(&self, markers: &[&str]) -> Vec<String> {
        self.skills()
            .iter()
            .find(|s| {
                let name = s.name.to_lowercase();
                markers.iter().any(|m| name.contains(m))
            })
            .map(|s| s.keywords.clone())
            .unwrap_or_default()
    }

    /// Every skill keyword in document order, duplicates kept.
    pub fn all_skill_keywords(&self) -> Vec<String> {
        self.skills()
            .iter()
            .flat_map(|s| s.keywords.iter().cloned())
            .collect()
    }

    pub fn work_periods(&self, locale: Locale) -> Vec<WorkPeriod<'a>> {
        self.work()
            .iter()
            .map(|w| WorkPeriod {
                name: &w.name,
                position: &w.position,
                period: format_date_range(&w.start_date, &w.end_date, locale),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::parser::parse_resume;

    const RESUME: &str = r#"
content:
  basics:
    name: Camille Martin
    profiles:
      - network: GitHub
        url: https://github.com/cmartin
        username: cmartin
      - network: linkedin
        url: https://linkedin.com/in/cmartin
        username: cmartin-li
      - network: GITHUB
        url: https://github.com/duplicate
        username: duplicate
  work:
    - name: Acme
      position: Lead
      startDate: 2023-01-15
    - name: Initech
      position: Dev
      startDate: 2020-06-01
      endDate: 2021-09-01
  skills:
    - name: Langues
      keywords: [Français, Anglais]
    - name: Développement
      keywords: [Rust, TypeScript, Vue]
    - name: DevOps & Infrastructure
      keywords: [Docker, Kubernetes]
    - name: Outils
      keywords: [Git, Rust]
    - name: Backend avancé
      keywords: [gRPC]
    - name: Méthodologies
      keywords: [Scrum]
"#;

    fn resume() -> Resume {
        parse_resume(RESUME).unwrap()
    }

    #[test]
    fn test_profile_lookup_is_case_insensitive() {
        let resume = resume();
        let view = ResumeView::new(&resume);
        assert_eq!(view.profile("github").unwrap().username, "cmartin");
        assert_eq!(view.profile("LINKEDIN").unwrap().username, "cmartin-li");
        assert!(view.profile("twitter").is_none());
    }

    #[test]
    fn test_profile_lookup_is_exact_not_prefix() {
        let resume = resume();
        assert!(ResumeView::new(&resume).profile("git").is_none());
    }

    #[test]
    fn test_skills_by_category_takes_first_match() {
        let resume = resume();
        let categories = ResumeView::new(&resume).skills_by_category();
        assert_eq!(categories.development, vec!["Rust", "TypeScript", "Vue"]);
        assert_eq!(categories.infrastructure, vec!["Docker", "Kubernetes"]);
        assert_eq!(categories.other, vec!["Git", "Rust"]);
    }

    #[test]
    fn test_unmatched_group_contributes_nowhere() {
        let resume = resume();
        let categories = ResumeView::new(&resume).skills_by_category();
        let all: Vec<_> = categories
            .development
            .iter()
            .chain(&categories.infrastructure)
            .chain(&categories.other)
            .collect();
        assert!(!all.iter().any(|k| *k == "Français"));
    }

    #[test]
    fn test_skills_by_category_empty_without_matches() {
        let resume = parse_resume("content:\n  basics:\n    name: X\n").unwrap();
        assert_eq!(
            ResumeView::new(&resume).skills_by_category(),
            SkillsByCategory::default()
        );
    }

    #[test]
    fn test_methodology_stem_matches() {
        let resume = parse_resume(
            "content:\n  basics:\n    name: X\n  skills:\n    - name: Méthodologie agile\n      keywords: [Kanban]\n",
        )
        .unwrap();
        assert_eq!(ResumeView::new(&resume).skills_by_category().other, vec!["Kanban"]);
    }

    #[test]
    fn test_all_skill_keywords_flattens_in_order() {
        let resume = resume();
        let view = ResumeView::new(&resume);
        let all = view.all_skill_keywords();
        let expected_len: usize = view.skills().iter().map(|s| s.keywords.len()).sum();
        assert_eq!(all.len(), expected_len);
        assert_eq!(&all[..3], &["Français", "Anglais", "Rust"]);
        assert_eq!(all.iter().filter(|k| *k == "Rust").count(), 2);
    }

    #[test]
    fn test_work_periods_format_each_entry() {
        let resume = resume();
        let periods = ResumeView::new(&resume).work_periods(Locale::En);
        assert_eq!(periods[0].period, "Jan 2023 - Present");
        assert_eq!(periods[1].period, "Jun 2020 - Sep 2021");
        assert_eq!(periods[1].name, "Initech");
    }
}

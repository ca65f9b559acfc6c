/// End-to-end tests for the lead pipeline
/// Tests stage composition, ordering and the exported record shape
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_lead_pipeline::cities::CityCatalog;
use rust_lead_pipeline::core::enrichment::LeadEnricher;
use rust_lead_pipeline::core::filter::LeadFilter;
use rust_lead_pipeline::core::models::{Lead, LeadRecord, NewLead, HIGH_POTENTIAL_TAG};
use rust_lead_pipeline::core::pipeline::LeadPipeline;
use rust_lead_pipeline::core::scorer::LeadScorer;
use rust_lead_pipeline::core::tagger::{IndustryTable, LeadTagger};

fn scenario_lead(email: &str, company_size: Option<&str>) -> Lead {
    let mut new_lead = NewLead::new("Scenario Lead", email)
        .company("DataWorks")
        .position("Senior Software Engineer")
        .location("Jakarta")
        .industry("General");
    new_lead.company_size = company_size.map(str::to_string);
    new_lead.into_lead(&CityCatalog::default(), &mut StdRng::seed_from_u64(0))
}

fn jakarta_tech_pipeline() -> LeadPipeline {
    LeadPipeline::new(
        Some(LeadEnricher::default()),
        LeadTagger::new(IndustryTable::default(), 50),
        LeadScorer::new(vec!["Jakarta".to_string()], vec!["Tech".to_string()], 10),
    )
}

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn test_end_to_end_scenario_stage_by_stage() {
        let leads = vec![
            scenario_lead("same@example.com", None),
            scenario_lead("same@example.com", None),
            scenario_lead("other@example.com", Some("Unknown")),
        ];
        let mut rng = StdRng::seed_from_u64(99);

        let mut leads = LeadFilter::new().deduplicate(leads);
        assert_eq!(leads.len(), 2);

        let tagger = LeadTagger::default();
        tagger.tag_industry(&mut leads);
        assert!(leads.iter().all(|l| l.industry == "Tech"));

        LeadEnricher::default().enrich_leads(&mut leads, &mut rng);
        assert!(["Small", "Medium", "Large"].contains(&leads[1].company_size.as_str()));
        assert!(leads.iter().all(|l| l.industry == "Tech"));

        let scorer = LeadScorer::new(vec!["Jakarta".to_string()], vec!["Tech".to_string()], 10);
        scorer.apply(&mut leads);
        for lead in &leads {
            let size_bonus = match lead.company_size.as_str() {
                "Large" => 20,
                "Medium" => 10,
                _ => 0,
            };
            assert_eq!(lead.score, (10 + 30 + 40 + size_bonus).min(100));
        }

        tagger.add_tag_high_potential(&mut leads);
        for lead in &leads {
            assert_eq!(lead.score >= 50, lead.has_tag(HIGH_POTENTIAL_TAG));
        }
    }

    #[test]
    fn test_end_to_end_scenario_through_pipeline() {
        let leads = vec![
            scenario_lead("same@example.com", None),
            scenario_lead("same@example.com", None),
            scenario_lead("other@example.com", None),
        ];

        let out = jakarta_tech_pipeline().run(leads, &mut StdRng::seed_from_u64(1));

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].email, "same@example.com");
        assert_eq!(out[1].email, "other@example.com");
        for lead in &out {
            assert_eq!(lead.industry, "Tech");
            assert_eq!(lead.company_size, "Medium");
            assert_eq!(lead.score, 90);
            assert_eq!(lead.tags(), &[HIGH_POTENTIAL_TAG.to_string()]);
            assert_eq!(lead.missing_info, Some(false));
        }
    }

    #[test]
    fn test_rerunning_pipeline_compounds_high_potential_bonus() {
        let leads = vec![NewLead::new("A", "a@example.com")
            .company("DataWorks")
            .position("Developer")
            .location("Tokyo")
            .company_size("Small")
            .into_lead(&CityCatalog::default(), &mut StdRng::seed_from_u64(0))];
        let pipeline = jakarta_tech_pipeline();

        let first = pipeline.run(leads, &mut StdRng::seed_from_u64(1));
        assert_eq!(first[0].score, 50);

        let second = pipeline.run(first, &mut StdRng::seed_from_u64(1));
        assert_eq!(second[0].score, 60);
        assert_eq!(second[0].tags().len(), 1);
    }

    #[test]
    fn test_missing_info_flag_through_pipeline() {
        let leads = vec![
            NewLead::new("A", "a@example.com")
                .position("Engineer")
                .location("Jakarta")
                .into_lead(&CityCatalog::default(), &mut StdRng::seed_from_u64(0)),
            NewLead::new("B", "b@example.com")
                .company("HealthPlus")
                .position("Senior Software Engineer")
                .location("Jakarta")
                .into_lead(&CityCatalog::default(), &mut StdRng::seed_from_u64(0)),
        ];

        let out = jakarta_tech_pipeline().run(leads, &mut StdRng::seed_from_u64(1));
        assert_eq!(LeadRecord::from(&out[0]).missing_info.as_deref(), Some("Yes"));
        assert_eq!(LeadRecord::from(&out[1]).missing_info.as_deref(), Some("No"));
        // the position table decides before the company name is consulted
        assert_eq!(out[1].industry, "Tech");
        assert_eq!(out[1].score, 90);
        assert!(out[1].has_tag(HIGH_POTENTIAL_TAG));
    }
}

#[cfg(test)]
mod export_tests {
    use super::*;
    use rust_lead_pipeline::integrations::export::ExportFormat;

    #[test]
    fn test_json_export_round_trips_records() {
        let dir = tempfile::tempdir().unwrap();
        let leads = jakarta_tech_pipeline().run(
            vec![scenario_lead("a@example.com", None)],
            &mut StdRng::seed_from_u64(1),
        );

        let path = ExportFormat::Json
            .export_to_dir(&leads, &dir.path().join("output"))
            .unwrap();
        assert!(path.ends_with("leads.json"));

        let content = std::fs::read_to_string(&path).unwrap();
        let records: Vec<LeadRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(records, vec![LeadRecord::from(&leads[0])]);
    }

    #[test]
    fn test_csv_export_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let leads = jakarta_tech_pipeline().run(
            vec![
                scenario_lead("a@example.com", None),
                scenario_lead("b@example.com", None),
            ],
            &mut StdRng::seed_from_u64(1),
        );

        let path = ExportFormat::Csv.export_to_dir(&leads, dir.path()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("name,email,company"));
        assert!(lines[1].contains("a@example.com"));
        assert!(lines[1].contains(HIGH_POTENTIAL_TAG));
    }
}

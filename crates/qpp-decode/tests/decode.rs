//! Tree construction from QRDA III documents.

use qpp_decode::decoders::{
    AGGREGATE_COUNT, CATEGORY, ENTITY_TYPE, MEASURE_ID, MEASURE_PERFORMED, NPI, PERFORMANCE_END,
    PERFORMANCE_START, POPULATION_TYPE, PROGRAM_NAME, TAX_ID,
};
use qpp_decode::{decode_document, decode_file, xml};
use qpp_model::{ConversionConfig, Node, QrdaScope, TemplateId};

const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ClinicalDocument xmlns="urn:hl7-org:v3">
  <templateId root="2.16.840.1.113883.10.20.27.1.1" extension="2017-06-01"/>
  <informationRecipient>
    <intendedRecipient>
      <id root="2.16.840.1.113883.3.249.7" extension="MIPS"/>
    </intendedRecipient>
  </informationRecipient>
  <documentationOf>
    <serviceEvent>
      <performer>
        <assignedEntity>
          <id root="2.16.840.1.113883.4.6" extension="2567891421"/>
          <representedOrganization>
            <id root="2.16.840.1.113883.4.2" extension="123456789"/>
          </representedOrganization>
        </assignedEntity>
      </performer>
    </serviceEvent>
  </documentationOf>
  <component>
    <structuredBody>
      <component>
        <section>
          <templateId root="2.16.840.1.113883.10.20.27.2.4" extension="2017-06-01"/>
          <entry>
            <organizer>
              <templateId root="2.16.840.1.113883.10.20.27.3.33" extension="2017-06-01"/>
              <component>
                <observation>
                  <templateId root="2.16.840.1.113883.10.20.27.3.27" extension="2017-06-01"/>
                  <value code="y"/>
                </observation>
              </component>
              <reference>
                <externalDocument><id extension="IA_EPA_1"/></externalDocument>
              </reference>
            </organizer>
          </entry>
        </section>
      </component>
      <component>
        <section>
          <templateId root="2.16.840.1.113883.10.20.27.2.1" extension="2017-06-01"/>
          <entry>
            <act>
              <templateId root="2.16.840.1.113883.10.20.17.3.8"/>
              <effectiveTime>
                <low value="20170301"/>
                <high value="20170930"/>
              </effectiveTime>
            </act>
          </entry>
          <entry>
            <organizer>
              <templateId root="2.16.840.1.113883.10.20.27.3.1" extension="2016-09-01"/>
              <reference>
                <externalDocument><id extension="40280381-51f0-825b-0152-22b98cff181a"/></externalDocument>
              </reference>
              <component>
                <observation>
                  <templateId root="2.16.840.1.113883.10.20.27.3.5" extension="2016-09-01"/>
                  <value code="DENOM"/>
                  <entryRelationship>
                    <observation>
                      <templateId root="2.16.840.1.113883.10.20.27.3.3"/>
                      <value value="600"/>
                    </observation>
                  </entryRelationship>
                </observation>
              </component>
            </organizer>
          </entry>
        </section>
      </component>
    </structuredBody>
  </component>
</ClinicalDocument>
"#;

fn decode(xml_text: &str, config: &ConversionConfig) -> Node {
    let raw = xml::parse_str(xml_text).expect("parse");
    decode_document(&raw, config)
}

#[test]
fn header_values_are_extracted() {
    let root = decode(DOCUMENT, &ConversionConfig::default());
    assert_eq!(root.template(), TemplateId::ClinicalDocument);
    assert_eq!(root.value(PROGRAM_NAME), Some("mips"));
    assert_eq!(root.value(TAX_ID), Some("123456789"));
    assert_eq!(root.value(NPI), Some("2567891421"));
    assert_eq!(root.value(ENTITY_TYPE), Some("individual"));
}

#[test]
fn untemplated_wrappers_are_transparent() {
    let root = decode(DOCUMENT, &ConversionConfig::default());
    let sections: Vec<TemplateId> = root.children().iter().map(Node::template).collect();
    assert_eq!(sections, vec![TemplateId::IaSection, TemplateId::MeasureSection]);

    let quality = &root.children()[1];
    assert_eq!(quality.value(CATEGORY), Some("quality"));
    assert_eq!(
        quality.path().to_string(),
        "/ClinicalDocument/component[3]/structuredBody[0]/component[1]/section[0]"
    );

    let results = quality
        .find_first(TemplateId::MeasureReferenceResults)
        .expect("results");
    assert_eq!(
        results.value(MEASURE_ID),
        Some("40280381-51f0-825b-0152-22b98cff181a")
    );
    let data = &results.children()[0];
    assert_eq!(data.value(POPULATION_TYPE), Some("DENOM"));
    assert_eq!(data.children()[0].value(AGGREGATE_COUNT), Some("600"));
}

#[test]
fn unknown_templates_become_unrecognized_nodes() {
    let root = decode(DOCUMENT, &ConversionConfig::default());
    let measure = root.find_first(TemplateId::IaMeasure).expect("ia measure");
    assert_eq!(measure.value(MEASURE_ID), Some("IA_EPA_1"));
    assert_eq!(measure.value(MEASURE_PERFORMED), Some("Y"));
    assert_eq!(measure.children().len(), 1);
    assert_eq!(measure.children()[0].template(), TemplateId::Unrecognized);
}

#[test]
fn sections_without_reporting_parameters_get_a_default() {
    let root = decode(DOCUMENT, &ConversionConfig::default());

    let ia = &root.children()[0];
    let defaults: Vec<&Node> = ia
        .children()
        .iter()
        .filter(|child| child.template() == TemplateId::ReportingParametersAct)
        .collect();
    assert_eq!(defaults.len(), 1);
    assert!(defaults[0].is_default());
    assert_eq!(defaults[0].value(PERFORMANCE_START), Some("20170101"));

    let quality = &root.children()[1];
    let supplied = quality
        .find_first(TemplateId::ReportingParametersAct)
        .expect("reporting parameters");
    assert!(!supplied.is_default());
    assert_eq!(supplied.value(PERFORMANCE_START), Some("20170301"));
    assert_eq!(supplied.value(PERFORMANCE_END), Some("20170930"));
}

#[test]
fn skip_defaults_removes_synthesized_nodes() {
    let config = ConversionConfig::default().with_skip_defaults(true);
    let root = decode(DOCUMENT, &config);
    assert!(root.pre_order().all(|node| !node.is_default()));
    assert_eq!(root.find_all(&[TemplateId::ReportingParametersAct]).len(), 1);
}

#[test]
fn out_of_scope_templates_keep_structure_but_not_values() {
    let scope = QrdaScope::parse_filter(&["IA_SECTION"]).expect("scope");
    let config = ConversionConfig::default().with_scope(scope);
    let root = decode(DOCUMENT, &config);

    assert_eq!(root.template(), TemplateId::ClinicalDocument);
    assert_eq!(root.value(PROGRAM_NAME), None);
    let results = root
        .find_first(TemplateId::MeasureReferenceResults)
        .expect("results kept");
    assert_eq!(results.value(MEASURE_ID), None);
    let measure = root.find_first(TemplateId::IaMeasure).expect("ia measure");
    assert_eq!(measure.value(MEASURE_ID), Some("IA_EPA_1"));
}

#[test]
fn untemplated_root_is_unrecognized() {
    let root = decode("<html><body><p>hi</p></body></html>", &ConversionConfig::default());
    assert_eq!(root.template(), TemplateId::Unrecognized);
    assert!(root.children().is_empty());
}

#[test]
fn group_document_without_npi() {
    let root = decode(
        r#"<ClinicalDocument>
             <templateId root="2.16.840.1.113883.10.20.27.1.1" extension="2017-06-01"/>
             <informationRecipient><intendedRecipient><id extension="CPCPLUS"/></intendedRecipient></informationRecipient>
             <documentationOf><id root="2.16.840.1.113883.4.2" extension="000777777"/></documentationOf>
           </ClinicalDocument>"#,
        &ConversionConfig::default(),
    );
    assert_eq!(root.value(PROGRAM_NAME), Some("cpcplus"));
    assert_eq!(root.value(ENTITY_TYPE), Some("group"));
    assert_eq!(root.value(NPI), None);
}

#[test]
fn decode_file_reports_missing_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let error = decode_file(&dir.path().join("absent.xml"), &ConversionConfig::default())
        .unwrap_err();
    assert!(error.to_string().contains("absent.xml"));
}

#[test]
fn decode_file_reads_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("report.xml");
    std::fs::write(&path, DOCUMENT).expect("write");
    let root = decode_file(&path, &ConversionConfig::default()).expect("decode");
    assert_eq!(root.find_all(&[TemplateId::AggregateCount]).len(), 1);
}

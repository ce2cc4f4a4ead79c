//! QPP JSON rendering of decoded documents.

use qpp_decode::{decode_document, xml};
use qpp_encode::qpp::{MeasurementValue, QualityValue};
use qpp_encode::{EncodeError, OutputEncoder, QppJsonEncoder};
use qpp_model::{ConversionConfig, Node, NodePath, TemplateId};

const DOCUMENT: &str = r#"<ClinicalDocument xmlns="urn:hl7-org:v3">
  <templateId root="2.16.840.1.113883.10.20.27.1.1" extension="2017-06-01"/>
  <informationRecipient><intendedRecipient><id root="2.16.840.1.113883.3.249.7" extension="MIPS"/></intendedRecipient></informationRecipient>
  <documentationOf><serviceEvent><performer><assignedEntity>
    <id root="2.16.840.1.113883.4.6" extension="2567891421"/>
    <representedOrganization><id root="2.16.840.1.113883.4.2" extension="123456789"/></representedOrganization>
  </assignedEntity></performer></serviceEvent></documentationOf>
  <component><structuredBody>
    <component><section>
      <templateId root="2.16.840.1.113883.10.20.27.2.1" extension="2017-06-01"/>
      <entry><act>
        <templateId root="2.16.840.1.113883.10.20.17.3.8"/>
        <effectiveTime><low value="20170101"/><high value="20171231"/></effectiveTime>
      </act></entry>
      <entry><organizer>
        <templateId root="2.16.840.1.113883.10.20.27.3.1" extension="2016-09-01"/>
        <reference><externalDocument><id extension="40280381-51f0-825b-0152-22b98cff181a"/></externalDocument></reference>
        <component><observation>
          <templateId root="2.16.840.1.113883.10.20.27.3.5" extension="2016-09-01"/>
          <value code="IPOP"/>
          <entryRelationship><observation><templateId root="2.16.840.1.113883.10.20.27.3.3"/><value value="120"/></observation></entryRelationship>
        </observation></component>
        <component><observation>
          <templateId root="2.16.840.1.113883.10.20.27.3.5" extension="2016-09-01"/>
          <value code="DENOM"/>
          <entryRelationship><observation><templateId root="2.16.840.1.113883.10.20.27.3.3"/><value value="100"/></observation></entryRelationship>
        </observation></component>
        <component><observation>
          <templateId root="2.16.840.1.113883.10.20.27.3.5" extension="2016-09-01"/>
          <value code="NUMER"/>
          <entryRelationship><observation><templateId root="2.16.840.1.113883.10.20.27.3.3"/><value value="60"/></observation></entryRelationship>
        </observation></component>
        <component><observation>
          <templateId root="2.16.840.1.113883.10.20.27.3.5" extension="2016-09-01"/>
          <value code="DENEX"/>
          <entryRelationship><observation><templateId root="2.16.840.1.113883.10.20.27.3.3"/><value value="10"/></observation></entryRelationship>
        </observation></component>
      </organizer></entry>
    </section></component>
    <component><section>
      <templateId root="2.16.840.1.113883.10.20.27.2.5" extension="2017-06-01"/>
      <entry><act>
        <templateId root="2.16.840.1.113883.10.20.17.3.8"/>
        <effectiveTime><low value="20170101"/><high value="20171231"/></effectiveTime>
      </act></entry>
      <entry><organizer>
        <templateId root="2.16.840.1.113883.10.20.27.3.28" extension="2017-06-01"/>
        <reference><externalDocument><id extension="ACI_EP_1"/></externalDocument></reference>
        <component><observation>
          <templateId root="2.16.840.1.113883.10.20.27.3.31" extension="2016-09-01"/>
          <entryRelationship><observation><templateId root="2.16.840.1.113883.10.20.27.3.3"/><value value="5"/></observation></entryRelationship>
        </observation></component>
        <component><observation>
          <templateId root="2.16.840.1.113883.10.20.27.3.32" extension="2016-09-01"/>
          <entryRelationship><observation><templateId root="2.16.840.1.113883.10.20.27.3.3"/><value value="10"/></observation></entryRelationship>
        </observation></component>
      </organizer></entry>
    </section></component>
    <component><section>
      <templateId root="2.16.840.1.113883.10.20.27.2.4" extension="2017-06-01"/>
      <entry><organizer>
        <templateId root="2.16.840.1.113883.10.20.27.3.33" extension="2017-06-01"/>
        <component><observation>
          <templateId root="2.16.840.1.113883.10.20.27.3.27" extension="2017-06-01"/>
          <value code="Y"/>
        </observation></component>
        <reference><externalDocument><id extension="IA_EPA_1"/></externalDocument></reference>
      </organizer></entry>
    </section></component>
  </structuredBody></component>
</ClinicalDocument>
"#;

fn decoded() -> Node {
    decode_document(
        &xml::parse_str(DOCUMENT).expect("parse"),
        &ConversionConfig::default(),
    )
}

fn encode(root: &Node) -> String {
    let mut out = Vec::new();
    QppJsonEncoder.encode(root, &mut out).expect("encode");
    String::from_utf8(out).expect("utf-8")
}

#[test]
fn encodes_every_section_as_a_measurement_set() {
    let output = encode(&decoded());
    insta::assert_snapshot!(output, @r#"
    {
      "programName": "mips",
      "entityType": "individual",
      "taxpayerIdentificationNumber": "123456789",
      "nationalProviderIdentifier": "2567891421",
      "performanceYear": 2017,
      "measurementSets": [
        {
          "category": "quality",
          "submissionMethod": "electronicHealthRecord",
          "performanceStart": "2017-01-01",
          "performanceEnd": "2017-12-31",
          "measurements": [
            {
              "measureId": "40280381-51f0-825b-0152-22b98cff181a",
              "value": {
                "isEndToEndReported": true,
                "eligiblePopulation": 100,
                "performanceMet": 60,
                "performanceNotMet": 30,
                "eligiblePopulationExclusion": 10,
                "eligiblePopulationException": 0
              }
            }
          ]
        },
        {
          "category": "aci",
          "submissionMethod": "electronicHealthRecord",
          "performanceStart": "2017-01-01",
          "performanceEnd": "2017-12-31",
          "measurements": [
            {
              "measureId": "ACI_EP_1",
              "value": {
                "numerator": 5,
                "denominator": 10
              }
            }
          ]
        },
        {
          "category": "ia",
          "submissionMethod": "electronicHealthRecord",
          "performanceStart": "2017-01-01",
          "performanceEnd": "2017-12-31",
          "measurements": [
            {
              "measureId": "IA_EPA_1",
              "value": true
            }
          ]
        }
      ]
    }
    "#);
}

#[test]
fn output_is_byte_identical_across_runs() {
    let root = decoded();
    let first = encode(&root);
    assert_eq!(first, encode(&root));
    assert!(first.ends_with("}\n"));
}

#[test]
fn submission_model_exposes_quality_values() {
    let submission = QppJsonEncoder.submission(&decoded()).expect("submission");
    assert_eq!(submission.performance_year, Some(2017));
    let quality = &submission.measurement_sets[0].measurements[0].value;
    assert_eq!(
        quality,
        &MeasurementValue::Quality(QualityValue {
            is_end_to_end_reported: true,
            eligible_population: 100,
            performance_met: 60,
            performance_not_met: 30,
            eligible_population_exclusion: 10,
            eligible_population_exception: 0,
        })
    );
}

#[test]
fn rejects_non_document_roots() {
    let root = Node::new(TemplateId::Unrecognized, NodePath::root("html"));
    let mut out = Vec::new();
    let error = QppJsonEncoder.encode(&root, &mut out).unwrap_err();
    assert!(matches!(
        error,
        EncodeError::NotAClinicalDocument {
            template: TemplateId::Unrecognized
        }
    ));
    assert!(out.is_empty());
}

#[test]
fn unparsable_counts_are_encode_errors() {
    let xml_text = DOCUMENT.replace(r#"<value value="60"/>"#, r#"<value value="sixty"/>"#);
    let root = decode_document(
        &xml::parse_str(&xml_text).expect("parse"),
        &ConversionConfig::default(),
    );
    let mut out = Vec::new();
    let error = QppJsonEncoder.encode(&root, &mut out).unwrap_err();
    match error {
        EncodeError::InvalidValue { key, value, .. } => {
            assert_eq!(key, "aggregateCount");
            assert_eq!(value, "sixty");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn overflowing_population_sums_are_encode_errors() {
    let xml_text = DOCUMENT
        .replace(
            r#"<value value="100"/>"#,
            &format!(r#"<value value="{}"/>"#, u64::MAX),
        )
        .replace(r#"<value code="NUMER"/>"#, r#"<value code="DENOM"/>"#);
    let root = decode_document(
        &xml::parse_str(&xml_text).expect("parse"),
        &ConversionConfig::default(),
    );
    let mut out = Vec::new();
    let error = QppJsonEncoder.encode(&root, &mut out).unwrap_err();
    match error {
        EncodeError::InvalidValue { key, value, .. } => {
            assert_eq!(key, "aggregateCount");
            assert_eq!(value, "60");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(out.is_empty());
}

//! The run parameter documents, `params.xml` and `params.txt`.
//!
//! Both are rendered from one `ParamsDocument`, so they always carry the same
//! information. The XML copy is handed to the product formatter as GIPP.
use std::io::Write;
use std::path::{Path, PathBuf};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::info;

use crate::core::params::CompositeConfig;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct ParamEntry {
    pub tag: &'static str,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamSection {
    pub tag: &'static str,
    pub title: &'static str,
    pub entries: Vec<ParamEntry>,
}

/// Weighting constants, dates and consumed products of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamsDocument {
    pub sections: Vec<ParamSection>,
    pub inputs: Vec<PathBuf>,
}

fn entry(tag: &'static str, label: &'static str, value: impl ToString) -> ParamEntry {
    ParamEntry {
        tag,
        label,
        value: value.to_string(),
    }
}

impl ParamsDocument {
    pub fn from_config(config: &CompositeConfig) -> Self {
        let w = &config.params.weights;
        let date = &config.synthesis_date;
        let half = &config.synthesis_half;
        let sections = vec![
            ParamSection {
                tag: "Weight_AOT",
                title: "Weight AOT",
                entries: vec![
                    entry("weight_aot_min", "weight aot min", &w.weight_aot_min),
                    entry("weight_aot_max", "weight aot max", &w.weight_aot_max),
                    entry("aot_max", "aot max", &w.aot_max),
                ],
            },
            ParamSection {
                tag: "Weight_On_Clouds",
                title: "Weight on clouds",
                entries: vec![
                    entry("coarse_res", "coarse res", &w.coarse_res),
                    entry("sigma_small_cloud", "sigma small cloud", &w.sigma_small_cloud),
                    entry("sigma_large_cloud", "sigma large cloud", &w.sigma_large_cloud),
                ],
            },
            ParamSection {
                tag: "Weight_On_Date",
                title: "Weight on Date",
                entries: vec![
                    entry("weight_date_min", "weight date min", &w.weight_date_min),
                    entry("l3a_product_date", "l3a product date", date),
                    entry("half_synthesis", "half synthesis", half),
                ],
            },
            ParamSection {
                tag: "Dates_information",
                title: "Dates information",
                entries: vec![
                    entry("synthesis_date", "synthesis date", date),
                    entry("synthesis_half", "synthesis half", half),
                ],
            },
        ];
        Self {
            sections,
            inputs: config.inputs.clone(),
        }
    }

    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("metadata")))?;
        for section in &self.sections {
            writer.write_event(Event::Start(BytesStart::new(section.tag)))?;
            for e in &section.entries {
                write_text_element(&mut writer, e.tag, &e.value)?;
            }
            writer.write_event(Event::End(BytesEnd::new(section.tag)))?;
        }
        writer.write_event(Event::Start(BytesStart::new("XML_files")))?;
        for (i, input) in self.inputs.iter().enumerate() {
            let tag = format!("XML_{i}");
            write_text_element(&mut writer, &tag, &input.to_string_lossy())?;
        }
        writer.write_event(Event::End(BytesEnd::new("XML_files")))?;
        writer.write_event(Event::End(BytesEnd::new("metadata")))?;

        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push_str(section.title);
            out.push('\n');
            for e in &section.entries {
                out.push_str(&format!("    {:<17} = {}\n", e.label, e.value));
            }
        }
        out.push_str("Used XML files\n");
        for input in &self.inputs {
            out.push_str(&format!("  {}\n", input.display()));
        }
        out
    }
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Write `params.xml` and `params.txt`, returning the rendered document.
pub fn write_params_documents(
    config: &CompositeConfig,
    xml_path: &Path,
    txt_path: &Path,
) -> Result<ParamsDocument> {
    let doc = ParamsDocument::from_config(config);
    std::fs::write(xml_path, doc.to_xml()?)?;
    std::fs::write(txt_path, doc.to_text())?;
    info!("Wrote run parameters: {:?}, {:?}", xml_path, txt_path);
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CompositeConfig {
        CompositeConfig::new(
            "/opt/app",
            "20160315",
            "25",
            vec![
                PathBuf::from("/data/S2A_20160301.xml"),
                PathBuf::from("/data/S2A_20160311.xml"),
            ],
            10,
            "/out",
            "/data/bands.txt",
        )
    }

    #[test]
    fn xml_lists_inputs_in_order() {
        let xml = ParamsDocument::from_config(&config()).to_xml().unwrap();
        let first = xml.find("<XML_0>/data/S2A_20160301.xml</XML_0>").unwrap();
        let second = xml.find("<XML_1>/data/S2A_20160311.xml</XML_1>").unwrap();
        assert!(first < second);
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("    <weight_date_min>0.10</weight_date_min>"));
        assert!(xml.contains("<half_synthesis>25</half_synthesis>"));
    }

    #[test]
    fn text_aligns_labels() {
        let text = ParamsDocument::from_config(&config()).to_text();
        assert!(text.starts_with("Weight AOT\n    weight aot min    = 0.33\n"));
        assert!(text.contains("    sigma small cloud = 2\n"));
        assert!(text.contains("    l3a product date  = 20160315\n"));
        assert!(text.ends_with("Used XML files\n  /data/S2A_20160301.xml\n  /data/S2A_20160311.xml\n"));
    }

    #[test]
    fn special_characters_are_escaped_in_xml() {
        let mut cfg = config();
        cfg.inputs = vec![PathBuf::from("/data/a&b.xml")];
        let xml = ParamsDocument::from_config(&cfg).to_xml().unwrap();
        assert!(xml.contains("<XML_0>/data/a&amp;b.xml</XML_0>"));
    }

    #[test]
    fn padded_half_synthesis_is_written_as_given() {
        let mut cfg = config();
        cfg.synthesis_half = "025".to_string();
        let doc = ParamsDocument::from_config(&cfg);
        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("<half_synthesis>025</half_synthesis>"));
        assert!(xml.contains("<synthesis_half>025</synthesis_half>"));
        assert!(doc.to_text().contains("    synthesis half    = 025\n"));
    }
}

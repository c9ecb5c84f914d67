use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref PROCESS_ID: Regex = Regex::new(r#"<(?:\w+:)?process\b[^>]*?\bid="([^"]+)""#)
        .expect("Invalid PROCESS_ID regex pattern");
    static ref PROCESS_NAME: Regex =
        Regex::new(r#"<(?:\w+:)?process\b[^>]*?\bname="([^"]+)""#)
            .expect("Invalid PROCESS_NAME regex pattern");
    static ref TASK: Regex = Regex::new(r"<(?:\w+:)?(?:userTask|serviceTask|scriptTask|manualTask|sendTask|receiveTask|businessRuleTask|task|callActivity|subProcess)\b")
        .expect("Invalid TASK regex pattern");
    static ref GATEWAY: Regex = Regex::new(r"<(?:\w+:)?(?:exclusiveGateway|inclusiveGateway|parallelGateway|eventBasedGateway|complexGateway)\b")
        .expect("Invalid GATEWAY regex pattern");
    static ref EVENT: Regex = Regex::new(r"<(?:\w+:)?(?:startEvent|endEvent|intermediateCatchEvent|intermediateThrowEvent|boundaryEvent)\b")
        .expect("Invalid EVENT regex pattern");
    static ref FLOW: Regex = Regex::new(r"<(?:\w+:)?sequenceFlow\b")
        .expect("Invalid FLOW regex pattern");
}

/// Element counts pulled out of a BPMN document for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramSummary {
    pub process_id: Option<String>,
    pub process_name: Option<String>,
    pub task_count: usize,
    pub gateway_count: usize,
    pub event_count: usize,
    pub flow_count: usize,
}

impl DiagramSummary {
    pub fn element_count(&self) -> usize {
        self.task_count + self.gateway_count + self.event_count
    }

    pub fn label(&self) -> String {
        let name = self
            .process_name
            .as_deref()
            .or(self.process_id.as_deref())
            .unwrap_or("(no process)");
        format!(
            "{} - {} tasks, {} gateways, {} events, {} flows",
            name, self.task_count, self.gateway_count, self.event_count, self.flow_count
        )
    }
}

/// Scan the XML text for the first process and count its flow nodes.
///
/// This is a textual scan, not a parse: it never fails, and anything it
/// does not recognize simply isn't counted.
pub fn summarize(xml: &str) -> DiagramSummary {
    DiagramSummary {
        process_id: PROCESS_ID
            .captures(xml)
            .map(|caps| caps[1].to_string()),
        process_name: PROCESS_NAME
            .captures(xml)
            .map(|caps| caps[1].to_string()),
        task_count: TASK.find_iter(xml).count(),
        gateway_count: GATEWAY.find_iter(xml).count(),
        event_count: EVENT.find_iter(xml).count(),
        flow_count: FLOW.find_iter(xml).count(),
    }
}

// keyword chat - canned replies, first matching trigger wins

pub const DEFAULT_REPLY: &str = "Please describe your symptoms clearly.";

// order matters
const TRIGGERS: [(&str, &str); 3] = [
    ("fever", "Please monitor your temperature and stay hydrated."),
    ("chest pain", "Chest pain can be serious. Please seek immediate medical help."),
    ("headache", "Take rest and drink water. If severe, consult a doctor."),
];

pub struct Chat;

impl Chat {
    pub fn reply(message: &str) -> &'static str {
        let message = message.to_lowercase();

        TRIGGERS
            .iter()
            .find(|(trigger, _)| message.contains(trigger))
            .map(|(_, reply)| *reply)
            .unwrap_or(DEFAULT_REPLY)
    }
}

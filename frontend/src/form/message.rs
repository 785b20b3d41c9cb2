use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Inicial,
    Acompanhamento,
    Empresarial,
}

impl Service {
    pub fn from_value(value: &str) -> Option<Self> {
        match value.trim() {
            "inicial" => Some(Service::Inicial),
            "acompanhamento" => Some(Service::Acompanhamento),
            "empresarial" => Some(Service::Empresarial),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Service::Inicial => "Consulta Inicial",
            Service::Acompanhamento => "Acompanhamento Mensal",
            Service::Empresarial => "Consultoria Empresarial",
        }
    }
}

/// Contact form values captured at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

impl Submission {
    /// Builds a submission from `(field name, value)` pairs. Unknown names are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut submission = Submission::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "name" => &mut submission.name,
                "email" => &mut submission.email,
                "phone" => &mut submission.phone,
                "service" => &mut submission.service,
                "message" => &mut submission.message,
                _ => continue,
            };
            *slot = value.into();
        }
        submission
    }

    /// Readable name of the selected service. Values outside the known set
    /// are shown verbatim.
    pub fn service_label(&self) -> Option<String> {
        let value = self.service.trim();
        if value.is_empty() {
            return None;
        }
        Some(match Service::from_value(value) {
            Some(service) => service.label().to_string(),
            None => value.to_string(),
        })
    }

    /// Text sent to the practice's WhatsApp chat.
    pub fn compose(&self) -> String {
        let mut text = String::from("🌿 *Nova solicitação de consulta*\n\n");
        let _ = writeln!(text, "👤 *Nome:* {}", self.name.trim());
        let _ = writeln!(text, "📧 *E-mail:* {}", self.email.trim());
        let _ = writeln!(text, "📱 *WhatsApp:* {}", self.phone.trim());

        if let Some(label) = self.service_label() {
            let _ = writeln!(text, "🩺 *Serviço:* {}", label);
        }

        let message = self.message.trim();
        if !message.is_empty() {
            let _ = write!(text, "\n💬 *Mensagem:*\n{}", message);
        }

        text.push_str("\n\n_Mensagem enviada através do site_");
        text
    }
}

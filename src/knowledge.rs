//! Static knowledge base: topics, cues, canned answers.
//!
//! DESIGN
//! ======
//! Topics are scanned in declaration order and the first topic with a
//! matching cue wins, so the order of `BUILTIN_TOPICS` is the tie-break
//! priority. Cues are unanchored substrings in normalized form (see
//! `crate::normalize`): "registr" matches "registro", "registrarme" and
//! "registrooo" alike.
//!
//! The base is built once and shared read-only (`Arc<KnowledgeBase>`) by
//! every matcher. Tests substitute a minimal base through `KnowledgeBase::new`.

use crate::normalize::normalize;

// =============================================================================
// BUILT-IN DATA
// =============================================================================

const BUILTIN_TOPICS: &[(&str, &[&str], &str)] = &[
    (
        "registro",
        &["registr", "crear cuenta", "nuevo usuario", "sign up"],
        "Para registrarte ve a la pantalla de registro, completa tu nombre, correo y contraseña (mínimo 6 caracteres) y pulsa “Registrar”. El rol por defecto es estudiante pero puedes indicar tu profesión, país y ciudad para personalizar tu perfil.",
    ),
    (
        "login",
        &["ingresar", "login", "iniciar sesion", "entrar", "inicio de sesion"],
        "Ingresa con tu correo y contraseña en la pantalla de acceso. Si los datos son correctos se genera un token y se guarda junto con tu email y rol. Usa ese token para acceder a las áreas protegidas.",
    ),
    (
        "rol profesor",
        &["profesor", "docente", "teacher", "crear clase", "crear curso"],
        "Si tienes rol de profesor podrás crear cursos y clases. Completa título, descripción y materiales desde el panel de profesor (páginas de /teacher), y publica para que tus estudiantes lo vean.",
    ),
    (
        "rol estudiante",
        &["estudiante", "student", "ver clases", "clases nuevas", "mis cursos"],
        "Con rol estudiante puedes inscribirte y ver las clases disponibles. Revisa la sección de estudiante para avanzar, dejar feedback y retomar el progreso que guardamos por ti.",
    ),
    (
        "seguridad",
        &["token", "seguridad", "auth", "autenticacion", "sesion"],
        "El backend entrega un token JWT al iniciar sesión o al registrarte. Lo almacenamos localmente junto a tu correo y rol para autenticarte en las posteriores peticiones sin volver a escribir tus credenciales.",
    ),
    (
        "soporte",
        &["soporte", "ayuda", "contacto", "problema", "bug", "olvide"],
        "Si tienes problemas (por ejemplo, olvidaste contraseña) valida tu correo y restablece desde la opción de recuperación. Envía detalles del error y qué estabas haciendo para ayudarte más rápido.",
    ),
];

const BUILTIN_FALLBACKS: &[&str] = &[
    "Puedo ayudarte con registro, inicio de sesión, roles de estudiante/profesor y cómo funcionan las clases. Escríbeme lo que necesitas.",
    "Estoy listo para resolver dudas rápidas de la plataforma: crear cursos, ver clases, problemas de acceso o configuración de perfil.",
    "Cuéntame qué quieres hacer: registrarte, iniciar sesión, publicar un curso o saber cómo gestionamos tu sesión.",
];

/// Quick prompts offered as chips; also the suggestion pool for fallbacks.
const BUILTIN_SUGGESTIONS: &[&str] = &[
    "¿Cómo me registro como estudiante?",
    "¿Puedo crear cursos siendo profesor?",
    "¿Qué hago si olvidé mi contraseña?",
    "¿Cómo veo mis clases nuevas?",
];

/// Substrings that mark a greeting when no topic matched.
pub const GREETING_CUES: &[&str] = &["hola", "buenas", "hey"];

const BUILTIN_GREETING: &str = "¡Hola! Soy el asistente IA de Knowledge. Puedo guiarte en registro, inicio de sesión, creación de cursos y cómo ver tus clases.";

const BUILTIN_WELCOME: &str =
    "Hola, soy tu asistente IA. Pregunta sobre registro, inicio de sesión, roles y cómo usar Knowledge.";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KnowledgeError {
    #[error("topic '{topic}' has no cues")]
    NoCues { topic: String },
    #[error("topic '{topic}' has an empty cue")]
    EmptyCue { topic: String },
    #[error("cue '{cue}' of topic '{topic}' is not normalized")]
    UnnormalizedCue { topic: String, cue: String },
    #[error("fallback set is empty")]
    EmptyFallbacks,
    #[error("suggestion set is empty")]
    EmptySuggestions,
}

/// One knowledge-base entry. `name` is informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub name: String,
    pub cues: Vec<String>,
    pub answer: String,
}

impl Topic {
    #[must_use]
    pub fn new(name: impl Into<String>, cues: &[&str], answer: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cues: cues.iter().map(|c| (*c).to_string()).collect(),
            answer: answer.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    topics: Vec<Topic>,
    fallbacks: Vec<String>,
    suggestions: Vec<String>,
    greeting: String,
    welcome: String,
}

impl KnowledgeBase {
    /// Build a knowledge base from explicit parts.
    ///
    /// The greeting and welcome texts start as the built-in ones; override
    /// them with `with_greeting` / `with_welcome`.
    ///
    /// # Errors
    ///
    /// Rejects topics without cues, empty cues (they would match every
    /// input), cues that are not in normalized form (they could never
    /// match), and empty fallback or suggestion sets.
    pub fn new(topics: Vec<Topic>, fallbacks: Vec<String>, suggestions: Vec<String>) -> Result<Self, KnowledgeError> {
        for topic in &topics {
            if topic.cues.is_empty() {
                return Err(KnowledgeError::NoCues { topic: topic.name.clone() });
            }
            for cue in &topic.cues {
                if cue.is_empty() {
                    return Err(KnowledgeError::EmptyCue { topic: topic.name.clone() });
                }
                if normalize(cue) != *cue {
                    return Err(KnowledgeError::UnnormalizedCue { topic: topic.name.clone(), cue: cue.clone() });
                }
            }
        }
        if fallbacks.is_empty() {
            return Err(KnowledgeError::EmptyFallbacks);
        }
        if suggestions.is_empty() {
            return Err(KnowledgeError::EmptySuggestions);
        }

        Ok(Self {
            topics,
            fallbacks,
            suggestions,
            greeting: BUILTIN_GREETING.to_string(),
            welcome: BUILTIN_WELCOME.to_string(),
        })
    }

    /// The knowledge base shipped with the widget.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            topics: BUILTIN_TOPICS
                .iter()
                .map(|(name, cues, answer)| Topic::new(*name, cues, *answer))
                .collect(),
            fallbacks: to_strings(BUILTIN_FALLBACKS),
            suggestions: to_strings(BUILTIN_SUGGESTIONS),
            greeting: BUILTIN_GREETING.to_string(),
            welcome: BUILTIN_WELCOME.to_string(),
        }
    }

    #[must_use]
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    #[must_use]
    pub fn with_welcome(mut self, welcome: impl Into<String>) -> Self {
        self.welcome = welcome.into();
        self
    }

    /// Topics in priority order.
    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    #[must_use]
    pub fn fallbacks(&self) -> &[String] {
        &self.fallbacks
    }

    /// Suggested prompts, in display order.
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Answer for greetings that matched no topic.
    #[must_use]
    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Assistant message seeded into every new conversation.
    #[must_use]
    pub fn welcome(&self) -> &str {
        &self.welcome
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
#[path = "knowledge_test.rs"]
mod tests;

// crates/ignite-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings for provisioning and audit reports.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The Ignite CLI stores user-facing strings in a small translation catalog so
//! console reports stay consistent between commands. All runtime output should
//! be routed through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - Variants are stable for CLI parsing and catalog lookup.
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Spanish.
    Es,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Es];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `path`).
/// - `value` is preformatted and should be safe for display.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "ignite {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config validated successfully."),
    ("config.invalid", "Invalid provisioning settings: {error}"),
    ("credentials.missing", "Missing credentials: {error}"),
    ("event_log.open_failed", "Failed to open event log {path}: {error}"),
    ("rule", "═══════════════════════════════════════════════════════════════════"),
    ("provision.banner.title", "🚀 IGNITE - Payload CMS Deployment"),
    ("provision.banner.target", "📦 Target: {project}"),
    ("provision.banner.control_plane", "🔗 Dokploy: {url}"),
    ("provision.client_failed", "Failed to build control-plane client: {error}"),
    ("step.create_project", "Creating project"),
    ("step.create_database", "Creating database service"),
    ("step.deploy_database", "Deploying database service"),
    ("step.create_application", "Creating application"),
    ("step.configure_build", "Configuring source and build"),
    ("step.inject_environment", "Injecting environment variables"),
    ("step.deploy_application", "Triggering build and deploy"),
    ("provision.step.started", "[{number}/{total}] {title}..."),
    ("provision.step.output", "✅ {field}: {value}"),
    ("provision.step.warning", "⚠️  {message}"),
    ("provision.step.failed", "❌ {message}"),
    ("provision.complete.title", "🎉 PROVISIONING COMPLETE"),
    ("provision.complete.ids", "📌 Resource IDs:"),
    ("provision.complete.project", "   Project ID:     {id}"),
    ("provision.complete.environment", "   Environment ID: {id}"),
    ("provision.complete.database", "   Database ID:    {id}"),
    ("provision.complete.application", "   Application ID: {id}"),
    ("provision.complete.names", "📌 Service Names:"),
    ("provision.complete.database_name", "   Database:       {name}"),
    ("provision.complete.application_name", "   Application:    {name}"),
    ("provision.complete.next", "📌 Next Steps:"),
    ("provision.complete.next.dns", "   1. Point DNS for {domain} to your Dokploy server IP"),
    ("provision.complete.next.domain", "   2. Add domain in Dokploy: {app} -> Domains -> {domain}"),
    ("provision.complete.next.https", "   3. Enable HTTPS (Let's Encrypt)"),
    ("provision.complete.next.logs", "   4. Monitor build logs in the Dokploy dashboard"),
    ("provision.complete.dockerfile", "📌 The Dockerfile must run these before 'next build':"),
    ("provision.complete.dockerfile.importmap", "   RUN pnpm generate:importmap"),
    ("provision.complete.dockerfile.clean", "   RUN rm -rf .next"),
    ("provision.warnings", "⚠️  Warnings:"),
    ("provision.warning.entry", "   - {message}"),
    ("provision.aborted.title", "❌ PROVISIONING ABORTED at step {number} ({step})"),
    ("provision.aborted.error", "Error: {error}"),
    ("provision.aborted.body", "API Response: {body}"),
    ("provision.aborted.state", "State reached before the failure:"),
    ("provision.aborted.partial", "Resources created before the failure were left in place."),
    ("provision.aborted.teardown", "Remove them with: ignite teardown --project-id {id}"),
    ("provision.plan.title", "Provisioning plan (dry run, no remote calls):"),
    ("provision.plan.step", "  [{number}/{total}] {title}: {operations}"),
    ("provision.plan.env", "Environment variables:"),
    ("provision.plan.env_entry", "  {line}"),
    ("provision.plan.failed", "Failed to build provisioning plan: {error}"),
    ("teardown.ok", "Project {id} removed."),
    ("teardown.failed", "Teardown failed: {error}"),
    ("audit.banner.title", " SCHEMA ALIGNMENT AUDIT"),
    ("audit.source_failed", "Failed to open content store: {error}"),
    (
        "audit.collection.checked",
        "✓ {collection}: {checked} documents checked, {failed} failures",
    ),
    ("audit.collection.fetch_failed", "✗ {collection}: Failed to audit - {error}"),
    ("audit.passed", " ✅ AUDIT PASSED - All documents comply with schema"),
    ("audit.summary", "{documents} documents checked across {collections} collections"),
    (
        "audit.fetch_warned",
        "⚠️  {count} collection(s) could not be audited (fetch_failure = warn)",
    ),
    ("audit.failed", " ❌ AUDIT FAILED - Schema mismatches found"),
    ("audit.failed.unreadable", " ❌ AUDIT FAILED - {count} collection(s) could not be audited"),
    ("audit.failures.header", "Failures:"),
    ("audit.failure.document", "  • {label}:"),
    ("audit.failure.error", "    - {error}"),
    ("audit.unreadable.header", "Unreadable collections:"),
    ("audit.unreadable.entry", "  • {collection}: {error}"),
    ("audit.blocked", "⚠️  DEPLOYMENT BLOCKED - Fix data before promoting to production"),
    ("audit.remediation.header", "Remediation Options:"),
    ("audit.remediation.manual", "  1. Update documents manually in the Admin UI"),
    ("audit.remediation.migration", "  2. Run a migration script to set default values"),
    ("audit.remediation.optional", "  3. Adjust collection config to make fields optional"),
    ("audit.schema.unknown_collection", "No schema configured for collection {collection}."),
    ("audit.schema.serialize_failed", "Failed to serialize schema: {error}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'es'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Static Spanish catalog entries.
const CATALOG_ES: &[(&str, &str)] = &[
    ("main.version", "ignite {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "salida"),
    ("output.write_failed", "No se pudo escribir en {stream}: {error}"),
    ("config.load_failed", "No se pudo cargar la configuración: {error}"),
    ("config.validate.ok", "Configuración validada correctamente."),
    ("config.invalid", "Ajustes de aprovisionamiento no válidos: {error}"),
    ("credentials.missing", "Faltan credenciales: {error}"),
    ("event_log.open_failed", "No se pudo abrir el registro de eventos {path}: {error}"),
    ("rule", "═══════════════════════════════════════════════════════════════════"),
    ("provision.banner.title", "🚀 IGNITE - Despliegue de Payload CMS"),
    ("provision.banner.target", "📦 Destino: {project}"),
    ("provision.banner.control_plane", "🔗 Dokploy: {url}"),
    ("provision.client_failed", "No se pudo crear el cliente del plano de control: {error}"),
    ("step.create_project", "Creando proyecto"),
    ("step.create_database", "Creando servicio de base de datos"),
    ("step.deploy_database", "Desplegando servicio de base de datos"),
    ("step.create_application", "Creando aplicación"),
    ("step.configure_build", "Configurando repositorio y build"),
    ("step.inject_environment", "Inyectando variables de entorno"),
    ("step.deploy_application", "Lanzando build y despliegue"),
    ("provision.step.started", "[{number}/{total}] {title}..."),
    ("provision.step.output", "✅ {field}: {value}"),
    ("provision.step.warning", "⚠️  {message}"),
    ("provision.step.failed", "❌ {message}"),
    ("provision.complete.title", "🎉 APROVISIONAMIENTO COMPLETO"),
    ("provision.complete.ids", "📌 IDs de recursos:"),
    ("provision.complete.project", "   ID de proyecto:    {id}"),
    ("provision.complete.environment", "   ID de entorno:     {id}"),
    ("provision.complete.database", "   ID de base:        {id}"),
    ("provision.complete.application", "   ID de aplicación:  {id}"),
    ("provision.complete.names", "📌 Nombres de servicio:"),
    ("provision.complete.database_name", "   Base de datos:     {name}"),
    ("provision.complete.application_name", "   Aplicación:        {name}"),
    ("provision.complete.next", "📌 Siguientes pasos:"),
    (
        "provision.complete.next.dns",
        "   1. Apunta el DNS de {domain} a la IP del servidor Dokploy",
    ),
    (
        "provision.complete.next.domain",
        "   2. Agrega el dominio en Dokploy: {app} -> Domains -> {domain}",
    ),
    ("provision.complete.next.https", "   3. Habilita HTTPS (Let's Encrypt)"),
    ("provision.complete.next.logs", "   4. Revisa los logs de build en el panel de Dokploy"),
    (
        "provision.complete.dockerfile",
        "📌 El Dockerfile debe ejecutar esto antes de 'next build':",
    ),
    ("provision.complete.dockerfile.importmap", "   RUN pnpm generate:importmap"),
    ("provision.complete.dockerfile.clean", "   RUN rm -rf .next"),
    ("provision.warnings", "⚠️  Advertencias:"),
    ("provision.warning.entry", "   - {message}"),
    ("provision.aborted.title", "❌ APROVISIONAMIENTO ABORTADO en el paso {number} ({step})"),
    ("provision.aborted.error", "Error: {error}"),
    ("provision.aborted.body", "Respuesta de la API: {body}"),
    ("provision.aborted.state", "Estado alcanzado antes del fallo:"),
    (
        "provision.aborted.partial",
        "Los recursos creados antes del fallo se dejaron en su lugar.",
    ),
    ("provision.aborted.teardown", "Elimínalos con: ignite teardown --project-id {id}"),
    ("provision.plan.title", "Plan de aprovisionamiento (simulación, sin llamadas remotas):"),
    ("provision.plan.step", "  [{number}/{total}] {title}: {operations}"),
    ("provision.plan.env", "Variables de entorno:"),
    ("provision.plan.env_entry", "  {line}"),
    ("provision.plan.failed", "No se pudo generar el plan de aprovisionamiento: {error}"),
    ("teardown.ok", "Proyecto {id} eliminado."),
    ("teardown.failed", "Falló la eliminación: {error}"),
    ("audit.banner.title", " AUDITORÍA DE ALINEACIÓN DE ESQUEMA"),
    ("audit.source_failed", "No se pudo abrir el almacén de contenido: {error}"),
    (
        "audit.collection.checked",
        "✓ {collection}: {checked} documentos revisados, {failed} fallos",
    ),
    ("audit.collection.fetch_failed", "✗ {collection}: No se pudo auditar - {error}"),
    ("audit.passed", " ✅ AUDITORÍA APROBADA - Todos los documentos cumplen el esquema"),
    ("audit.summary", "{documents} documentos revisados en {collections} colecciones"),
    (
        "audit.fetch_warned",
        "⚠️  {count} colección(es) no se pudieron auditar (fetch_failure = warn)",
    ),
    ("audit.failed", " ❌ AUDITORÍA FALLIDA - Se encontraron discrepancias de esquema"),
    (
        "audit.failed.unreadable",
        " ❌ AUDITORÍA FALLIDA - {count} colección(es) no se pudieron auditar",
    ),
    ("audit.failures.header", "Fallos:"),
    ("audit.failure.document", "  • {label}:"),
    ("audit.failure.error", "    - {error}"),
    ("audit.unreadable.header", "Colecciones ilegibles:"),
    ("audit.unreadable.entry", "  • {collection}: {error}"),
    (
        "audit.blocked",
        "⚠️  DESPLIEGUE BLOQUEADO - Corrige los datos antes de promover a producción",
    ),
    ("audit.remediation.header", "Opciones de corrección:"),
    ("audit.remediation.manual", "  1. Actualiza los documentos manualmente en el Admin UI"),
    (
        "audit.remediation.migration",
        "  2. Ejecuta un script de migración para asignar valores por defecto",
    ),
    (
        "audit.remediation.optional",
        "  3. Ajusta la configuración de la colección para hacer opcionales los campos",
    ),
    (
        "audit.schema.unknown_collection",
        "No hay un esquema configurado para la colección {collection}.",
    ),
    ("audit.schema.serialize_failed", "No se pudo serializar el esquema: {error}"),
    ("i18n.lang.invalid_env", "Valor no válido para {env}: {value}. Se esperaba 'en' o 'es'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la salida que no está en inglés es traducción automática y puede ser inexacta.",
    ),
];

/// Returns the raw catalog entries for the requested locale.
#[cfg(test)]
pub(crate) const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Es => CATALOG_ES,
    }
}

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_ES_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Es => CATALOG_ES_MAP.get_or_init(|| CATALOG_ES.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let locale = current_locale();
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A localized [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}

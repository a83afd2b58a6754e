use core::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use opea_core::{ClienteId, DomainError, DomainResult, Entity};

/// Upper bound on `nome_empresa`, in characters.
///
/// Enforced at the request-validation boundary and by the storage column; the
/// entity itself only guards against blank names.
pub const NOME_EMPRESA_MAX_LEN: usize = 100;

/// Company size category.
///
/// Serialized as the variant name. Deserialization also accepts the numeric
/// code, and names are matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PorteEmpresa {
    Pequena,
    Media,
    Grande,
}

impl PorteEmpresa {
    pub const ALL: [PorteEmpresa; 3] = [PorteEmpresa::Pequena, PorteEmpresa::Media, PorteEmpresa::Grande];

    /// Stable numeric code (what the relational store persists).
    pub fn code(self) -> i64 {
        match self {
            PorteEmpresa::Pequena => 1,
            PorteEmpresa::Media => 2,
            PorteEmpresa::Grande => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PorteEmpresa::Pequena => "Pequena",
            PorteEmpresa::Media => "Media",
            PorteEmpresa::Grande => "Grande",
        }
    }
}

impl core::fmt::Display for PorteEmpresa {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PorteEmpresa {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "porte_empresa must be one of: Pequena, Media, Grande (got {s:?})"
                ))
            })
    }
}

impl Serialize for PorteEmpresa {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

struct PorteEmpresaVisitor;

impl Visitor<'_> for PorteEmpresaVisitor {
    type Value = PorteEmpresa;

    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("a porte name (Pequena, Media, Grande) or its numeric code (1, 2, 3)")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        PorteEmpresa::from_code(v).ok_or_else(|| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .ok()
            .and_then(PorteEmpresa::from_code)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }
}

impl<'de> Deserialize<'de> for PorteEmpresa {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PorteEmpresaVisitor)
    }
}

/// Aggregate root: Cliente (a customer company).
///
/// Fields are private; the only mutation path after construction is
/// [`Cliente::update`], which never changes the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cliente {
    id: ClienteId,
    nome_empresa: String,
    porte_empresa: PorteEmpresa,
}

impl Cliente {
    /// Create a new cliente with a freshly generated identifier.
    pub fn new(nome_empresa: impl Into<String>, porte_empresa: PorteEmpresa) -> DomainResult<Self> {
        let nome_empresa = nome_empresa.into();
        ensure_nome_empresa(&nome_empresa)?;

        Ok(Self {
            id: ClienteId::new(),
            nome_empresa,
            porte_empresa,
        })
    }

    /// Rebuild a cliente from persisted state.
    ///
    /// Storage is the authority for durable records, so no guard runs here.
    pub fn restore(id: ClienteId, nome_empresa: String, porte_empresa: PorteEmpresa) -> Self {
        Self {
            id,
            nome_empresa,
            porte_empresa,
        }
    }

    /// Replace name and size in place. Leaves `self` untouched on error.
    pub fn update(&mut self, nome_empresa: impl Into<String>, porte_empresa: PorteEmpresa) -> DomainResult<()> {
        let nome_empresa = nome_empresa.into();
        ensure_nome_empresa(&nome_empresa)?;

        self.nome_empresa = nome_empresa;
        self.porte_empresa = porte_empresa;
        Ok(())
    }

    pub fn id_typed(&self) -> ClienteId {
        self.id
    }

    pub fn nome_empresa(&self) -> &str {
        &self.nome_empresa
    }

    pub fn porte_empresa(&self) -> PorteEmpresa {
        self.porte_empresa
    }
}

impl Entity for Cliente {
    type Id = ClienteId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn ensure_nome_empresa(nome_empresa: &str) -> DomainResult<()> {
    if nome_empresa.trim().is_empty() {
        return Err(DomainError::invalid_argument(
            "nome_empresa",
            "must not be blank",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    fn porte_strategy() -> impl Strategy<Value = PorteEmpresa> {
        prop::sample::select(PorteEmpresa::ALL.to_vec())
    }

    fn valid_nome_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z0-9][A-Za-z0-9 &.-]{0,99}"
    }

    fn blank_nome_strategy() -> impl Strategy<Value = String> {
        "[ \t\r\n]{0,8}"
    }

    #[test]
    fn new_assigns_id_and_copies_fields() {
        let cliente = Cliente::new("Acme", PorteEmpresa::Pequena).unwrap();
        assert!(!cliente.id().as_uuid().is_nil());
        assert_eq!(cliente.nome_empresa(), "Acme");
        assert_eq!(cliente.porte_empresa(), PorteEmpresa::Pequena);
    }

    #[test]
    fn new_rejects_blank_name_naming_the_argument() {
        let err = Cliente::new("   ", PorteEmpresa::Grande).unwrap_err();
        assert_eq!(err.argument(), Some("nome_empresa"));
        assert_eq!(err.to_string(), "invalid argument `nome_empresa`: must not be blank");
    }

    #[test]
    fn update_replaces_fields_and_keeps_id() {
        let mut cliente = Cliente::new("Acme", PorteEmpresa::Pequena).unwrap();
        let id = cliente.id_typed();

        cliente.update("Acme Holdings", PorteEmpresa::Grande).unwrap();

        assert_eq!(cliente.id_typed(), id);
        assert_eq!(cliente.nome_empresa(), "Acme Holdings");
        assert_eq!(cliente.porte_empresa(), PorteEmpresa::Grande);
    }

    #[test]
    fn failed_update_leaves_entity_unchanged() {
        let mut cliente = Cliente::new("Acme", PorteEmpresa::Media).unwrap();
        let before = cliente.clone();

        let err = cliente.update("", PorteEmpresa::Grande).unwrap_err();

        assert!(matches!(err, DomainError::InvalidArgument { argument: "nome_empresa", .. }));
        assert_eq!(cliente, before);
    }

    #[test]
    fn restore_keeps_the_given_identity() {
        let id = ClienteId::new();
        let cliente = Cliente::restore(id, "Stored".to_string(), PorteEmpresa::Media);
        assert_eq!(cliente.id(), &id);
        assert!(cliente.same_identity_as(&Cliente::restore(id, "Other".to_string(), PorteEmpresa::Grande)));
    }

    #[test]
    fn porte_codes_round_trip() {
        for porte in PorteEmpresa::ALL {
            assert_eq!(PorteEmpresa::from_code(porte.code()), Some(porte));
        }
        assert_eq!(PorteEmpresa::from_code(0), None);
        assert_eq!(PorteEmpresa::from_code(4), None);
    }

    #[test]
    fn porte_parses_names_case_insensitively() {
        assert_eq!("pequena".parse::<PorteEmpresa>().unwrap(), PorteEmpresa::Pequena);
        assert_eq!(" GRANDE ".parse::<PorteEmpresa>().unwrap(), PorteEmpresa::Grande);
        assert!("Enorme".parse::<PorteEmpresa>().is_err());
    }

    #[test]
    fn porte_serde_accepts_name_or_code_and_writes_name() {
        let by_name: PorteEmpresa = serde_json::from_str("\"Media\"").unwrap();
        let by_code: PorteEmpresa = serde_json::from_str("2").unwrap();
        assert_eq!(by_name, PorteEmpresa::Media);
        assert_eq!(by_code, PorteEmpresa::Media);
        assert_eq!(serde_json::to_string(&PorteEmpresa::Media).unwrap(), "\"Media\"");

        assert!(serde_json::from_str::<PorteEmpresa>("7").is_err());
        assert!(serde_json::from_str::<PorteEmpresa>("-1").is_err());
        assert!(serde_json::from_str::<PorteEmpresa>("\"Huge\"").is_err());
    }

    proptest! {
        #[test]
        fn valid_inputs_are_preserved_verbatim(nome in valid_nome_strategy(), porte in porte_strategy()) {
            let cliente = Cliente::new(nome.clone(), porte).unwrap();
            prop_assert!(!cliente.id().as_uuid().is_nil());
            prop_assert_eq!(cliente.nome_empresa(), nome.as_str());
            prop_assert_eq!(cliente.porte_empresa(), porte);
        }

        #[test]
        fn blank_names_always_fail(nome in blank_nome_strategy(), porte in porte_strategy()) {
            prop_assert!(Cliente::new(nome.clone(), porte).is_err());

            let mut cliente = Cliente::new("Acme", PorteEmpresa::Pequena).unwrap();
            prop_assert!(cliente.update(nome, porte).is_err());
            prop_assert_eq!(cliente.nome_empresa(), "Acme");
        }

        #[test]
        fn separate_constructions_never_share_an_id(count in 2usize..64) {
            let ids: HashSet<ClienteId> = (0..count)
                .map(|_| Cliente::new("Acme", PorteEmpresa::Media).unwrap().id_typed())
                .collect();
            prop_assert_eq!(ids.len(), count);
        }
    }
}

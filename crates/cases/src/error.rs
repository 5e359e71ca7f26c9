/// Construction-time registry errors.
///
/// These describe declaration mistakes. A value that matches no case is never an
/// error; it is reported as `Optional::None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// Two cases in one registry share a name.
	#[error("{registry}: duplicate case name {name:?}")]
	DuplicateCaseName { registry: &'static str, name: String },

	/// Nesting the registry would make it contain itself.
	#[error("{registry}: case {name:?} nests {nested}, which already contains {registry}")]
	RecursiveUnionDefinition {
		registry: &'static str,
		name: String,
		nested: &'static str,
	},

	/// A union handle type was registered as a plain instance case.
	#[error("{registry}: case {name:?} registers union type {type_name} as an instance; use a union case")]
	InvalidCaseRegistration {
		registry: &'static str,
		name: String,
		type_name: &'static str,
	},

	/// Registration attempted after [`UCases::seal`](crate::UCases::seal).
	#[error("{registry}: cannot register {name:?} on a sealed registry")]
	Sealed { registry: &'static str, name: String },
}

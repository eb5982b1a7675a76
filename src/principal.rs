use std::fmt;

use kerberos_asn1::PrincipalName;
use kerberos_constants::principal_names::{NT_PRINCIPAL,NT_ENTERPRISE,NT_SRV_INST,NT_UNKNOWN};

/// A principal name together with the name type it should be sent as.
pub enum Principal {
	NtPrincipal(String),
	NtEnterprise(String),
	NtSrvInst(String),
	NtUnknown(String)
}

impl Principal {
	pub fn name_type(&self) -> i32 {
		match self {
			Principal::NtPrincipal(_) => NT_PRINCIPAL,
			Principal::NtEnterprise(_) => NT_ENTERPRISE,
			Principal::NtSrvInst(_) => NT_SRV_INST,
			Principal::NtUnknown(_) => NT_UNKNOWN
		}
	}

	pub fn name(&self) -> &str {
		match self {
			Principal::NtPrincipal(s) => s,
			Principal::NtEnterprise(s) => s,
			Principal::NtSrvInst(s) => s,
			Principal::NtUnknown(s) => s
		}
	}

	pub fn to_principal_name(&self) -> PrincipalName {
		// Enterprise names ("user@REALM") are a single component and are never split.
		let name_string = match self {
			Principal::NtEnterprise(s) => vec![s.to_string()],
			_ => spn_to_parts(self.name())
		};
		PrincipalName {
			name_type: self.name_type(),
			name_string
		}
	}
}

impl fmt::Display for Principal {
	fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.name())
	}
}

pub fn spn_to_parts(spn : &str) -> Vec<String> {
	spn.split("/").map(|s| s.to_string()).collect()
}

pub fn new_nt_principal(name : &str) -> PrincipalName {
	Principal::NtPrincipal(name.to_string()).to_principal_name()
}

pub fn new_nt_srv_inst(service : &str) -> PrincipalName {
	Principal::NtSrvInst(service.to_string()).to_principal_name()
}

/// The ticket-granting service of `realm`, "krbtgt/REALM".
pub fn krbtgt(realm : &str) -> PrincipalName {
	PrincipalName {
		name_type: NT_SRV_INST,
		name_string: vec!["krbtgt".to_string(), realm.to_string()]
	}
}

/// Render a principal name as "a/b/c", the inverse of [`spn_to_parts`].
pub fn principal_to_string(principal : &PrincipalName) -> String {
	principal.name_string.join("/")
}

//! Module names the binary answers to.

pub struct ModuleDef {
    pub name: &'static str,
    pub summary: &'static str,
}

/// Older single-purpose module names, expanded onto a canonical module
/// with some arguments pinned. Only `accepted` keys may be passed through.
pub struct ModuleAlias {
    pub name: &'static str,
    pub target: &'static str,
    pub pinned: &'static [(&'static str, &'static str)],
    pub required: &'static [&'static str],
    pub accepted: &'static [&'static str],
}

const SUPPORT_LEVEL_FILTERS: &[&str] = &[
    "openshift_version",
    "cpu_architecture",
    "platform_type",
    "external_platform_name",
];

pub const MODULES: &[ModuleDef] = &[
    ModuleDef {
        name: "clusters",
        summary: "List clusters, register one (state=present) or delete one (state=absent)",
    },
    ModuleDef {
        name: "events",
        summary: "List the events of a cluster",
    },
    ModuleDef {
        name: "infra_envs",
        summary: "Create an infra-env (state=present)",
    },
    ModuleDef {
        name: "openshift_versions",
        summary: "Query supported OpenShift versions",
    },
    ModuleDef {
        name: "operators",
        summary: "List supported operators",
    },
    ModuleDef {
        name: "support_levels",
        summary: "Query architecture or feature support levels",
    },
];

pub const MODULE_ALIASES: &[ModuleAlias] = &[
    ModuleAlias {
        name: "list_clusters",
        target: "clusters",
        pinned: &[],
        required: &[],
        accepted: &["with_hosts"],
    },
    ModuleAlias {
        name: "register_cluster",
        target: "clusters",
        pinned: &[("state", "present")],
        required: &["data"],
        accepted: &["data"],
    },
    ModuleAlias {
        name: "architectures",
        target: "support_levels",
        pinned: &[("resource_type", "architectures")],
        required: &["openshift_version"],
        accepted: SUPPORT_LEVEL_FILTERS,
    },
    ModuleAlias {
        name: "features",
        target: "support_levels",
        pinned: &[("resource_type", "features")],
        required: &["openshift_version"],
        accepted: SUPPORT_LEVEL_FILTERS,
    },
];

pub fn alias_by_name(name: &str) -> Option<&'static ModuleAlias> {
    MODULE_ALIASES.iter().find(|alias| alias.name == name)
}

pub fn known_module_names() -> Vec<&'static str> {
    MODULES
        .iter()
        .map(|module| module.name)
        .chain(MODULE_ALIASES.iter().map(|alias| alias.name))
        .collect()
}

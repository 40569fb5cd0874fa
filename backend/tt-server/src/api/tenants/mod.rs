pub mod tenants;
pub mod update_tenant_request;

/// Test data fixtures for consistent testing
use sensapp_expr::test_utils::vector;
use sensapp_expr::{InstantVector, Scope};

/// CPU usage per host and core: 11 samples summing to 25
pub fn cpu() -> InstantVector {
    vector(&[
        (&[("host.name", "h1"), ("cpu", "0")], 1.0),
        (&[("host.name", "h1"), ("cpu", "1")], 2.0),
        (&[("host.name", "h1"), ("cpu", "2")], 3.0),
        (&[("host.name", "h1"), ("cpu", "3")], 4.0),
        (&[("host.name", "h2"), ("cpu", "0")], 1.0),
        (&[("host.name", "h2"), ("cpu", "1")], 2.0),
        (&[("host.name", "h2"), ("cpu", "2")], 3.0),
        (&[("host.name", "h2"), ("cpu", "3")], 4.0),
        (&[("host.name", "h3"), ("cpu", "0")], 1.0),
        (&[("host.name", "h3"), ("cpu", "1")], 2.0),
        (&[("host.name", "h3"), ("cpu", "2")], 2.0),
    ])
}

/// One sample per host, carrying the datacenter the host lives in
pub fn host_info() -> InstantVector {
    vector(&[
        (&[("host.name", "h1"), ("datacenter", "oslo")], 4.0),
        (&[("host.name", "h2"), ("datacenter", "oslo")], 4.0),
        (&[("host.name", "h3"), ("datacenter", "bergen")], 3.0),
    ])
}

/// Memory used per service. The api on h2 has an extra environment label.
pub fn mem_used() -> InstantVector {
    vector(&[
        (&[("service.name", "api"), ("host.name", "h1")], 512.0),
        (
            &[
                ("service.name", "api"),
                ("host.name", "h2"),
                ("service.environment", "production"),
            ],
            256.0,
        ),
        (&[("service.name", "db"), ("host.name", "h1")], 1024.0),
    ])
}

pub fn mem_total() -> InstantVector {
    vector(&[
        (&[("service.name", "api"), ("host.name", "h1")], 1024.0),
        (&[("service.name", "api"), ("host.name", "h2")], 1024.0),
        (&[("service.name", "db"), ("host.name", "h1")], 2048.0),
    ])
}

pub fn empty() -> InstantVector {
    vector(&[])
}

pub fn scope() -> Scope {
    Scope::new()
        .with("cpu", cpu())
        .with("host_info", host_info())
        .with("mem_used", mem_used())
        .with("mem_total", mem_total())
        .with("nothing", empty())
        .with("threshold", 2.0)
}

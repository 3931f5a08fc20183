use cloudflared_operator::rbac::cluster_role;

fn main() {
    let name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "cloudflared-operator".to_string());
    let yaml = serde_yaml::to_string(&cluster_role(&name))
        .expect("serialize ClusterRole to YAML");
    println!("{}", yaml);
}

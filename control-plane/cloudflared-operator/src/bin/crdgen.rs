use cloudflared_operator::crd::CloudflaredDeployment;
use kube::core::CustomResourceExt;

fn main() {
    let crd = CloudflaredDeployment::crd();
    let yaml = serde_yaml::to_string(&crd).expect("serialize CRD to YAML");
    println!("{}", yaml);
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec};
    use kube::core::ObjectMeta;

    use crate::controller::kinds::descriptor_for;
    use crate::crd::{CloudflaredDeployment, CloudflaredDeploymentSpec, WorkloadKind};
    use crate::templates::{
        DeriveError, ManagedWorkload, WorkloadDefaults, derive_parts, owner_ref,
    };

    fn record(spec: CloudflaredDeploymentSpec) -> CloudflaredDeployment {
        let mut cd = CloudflaredDeployment::new("test-resource", spec);
        cd.metadata.namespace = Some("default".into());
        cd.metadata.uid = Some("7f1c9a52-3c0e-4c1a-9d4e-1b2a3c4d5e6f".into());
        cd
    }

    fn defaults() -> WorkloadDefaults {
        WorkloadDefaults::new("cloudflared", "test")
    }

    fn app_labels(v: &str) -> BTreeMap<String, String> {
        BTreeMap::from([("app".to_string(), v.to_string())])
    }

    fn override_template(
        labels: Option<BTreeMap<String, String>>,
        containers: Vec<Container>,
    ) -> PodTemplateSpec {
        PodTemplateSpec {
            metadata: Some(ObjectMeta {
                labels,
                ..Default::default()
            }),
            spec: Some(PodSpec {
                containers,
                ..Default::default()
            }),
        }
    }

    fn render(cd: &CloudflaredDeployment, kind: WorkloadKind) -> ManagedWorkload {
        (descriptor_for(kind).build)(derive_parts(cd, &defaults()))
    }

    #[test]
    fn uses_record_name_and_namespace() {
        let cd = record(CloudflaredDeploymentSpec::default());
        for kind in WorkloadKind::ALL {
            let w = render(&cd, kind);
            assert_eq!(w.name(), "test-resource");
            assert_eq!(w.namespace(), Some("default"));
        }
    }

    #[test]
    fn default_template_runs_one_app_container() {
        let cd = record(CloudflaredDeploymentSpec::default());
        for kind in WorkloadKind::ALL {
            let w = render(&cd, kind);
            assert_eq!(w.selector_labels(), Some(&app_labels("cloudflared")));
            assert_eq!(w.template_labels(), Some(&app_labels("cloudflared")));
            assert_eq!(w.containers().len(), 1);
            assert_eq!(w.containers()[0].name, "cloudflared");
            assert_eq!(w.containers()[0].image.as_deref(), Some("test"));
        }
    }

    #[test]
    fn override_replaces_labels_and_containers_wholesale() {
        let cd = record(CloudflaredDeploymentSpec {
            kind: None,
            template: Some(override_template(
                Some(app_labels("cloudflared")),
                vec![Container {
                    name: "container-name".into(),
                    image: Some("something/not/cloudflared".into()),
                    ..Default::default()
                }],
            )),
        });
        let w = render(&cd, WorkloadKind::DaemonSet);
        assert_eq!(w.template_labels(), Some(&app_labels("cloudflared")));
        assert_eq!(w.selector_labels(), w.template_labels());
        assert_eq!(w.containers().len(), 1);
        assert_eq!(w.containers()[0].name, "container-name");
        assert_eq!(
            w.containers()[0].image.as_deref(),
            Some("something/not/cloudflared")
        );
    }

    #[test]
    fn custom_labels_drop_the_default_app_label() {
        let custom = BTreeMap::from([("tier".to_string(), "edge".to_string())]);
        let cd = record(CloudflaredDeploymentSpec {
            kind: None,
            template: Some(override_template(Some(custom.clone()), vec![])),
        });
        let w = render(&cd, WorkloadKind::Deployment);
        assert_eq!(w.template_labels(), Some(&custom));
        assert_eq!(w.selector_labels(), Some(&custom));
        // no containers in the override: defaults stay
        assert_eq!(w.containers()[0].name, "cloudflared");
    }

    #[test]
    fn empty_override_keeps_defaults() {
        let cd = record(CloudflaredDeploymentSpec {
            kind: None,
            template: Some(override_template(Some(BTreeMap::new()), vec![])),
        });
        let w = render(&cd, WorkloadKind::DaemonSet);
        assert_eq!(w.template_labels(), Some(&app_labels("cloudflared")));
        assert_eq!(w.containers()[0].image.as_deref(), Some("test"));
    }

    #[test]
    fn containers_only_override_keeps_default_labels() {
        let cd = record(CloudflaredDeploymentSpec {
            kind: None,
            template: Some(override_template(
                None,
                vec![
                    Container {
                        name: "a".into(),
                        image: Some("img/a".into()),
                        ..Default::default()
                    },
                    Container {
                        name: "b".into(),
                        image: Some("img/b".into()),
                        ..Default::default()
                    },
                ],
            )),
        });
        let w = render(&cd, WorkloadKind::DaemonSet);
        assert_eq!(w.selector_labels(), Some(&app_labels("cloudflared")));
        let names: Vec<_> = w.containers().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn derived_parts_have_no_owner_until_attached() {
        let cd = record(CloudflaredDeploymentSpec::default());
        let parts = derive_parts(&cd, &defaults());
        assert!(parts.metadata.owner_references.is_none());

        let owned = parts.with_owner(owner_ref(&cd).unwrap());
        let refs = owned.metadata.owner_references.expect("owner refs");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].api_version, "cloudflare.cloudflare.unmango.net/v1alpha1");
        assert_eq!(refs[0].kind, "CloudflaredDeployment");
        assert_eq!(refs[0].name, "test-resource");
        assert_eq!(refs[0].uid, "7f1c9a52-3c0e-4c1a-9d4e-1b2a3c4d5e6f");
        assert_eq!(refs[0].controller, Some(true));
        assert_eq!(refs[0].block_owner_deletion, Some(true));
    }

    #[test]
    fn owner_ref_requires_uid() {
        let mut cd = record(CloudflaredDeploymentSpec::default());
        cd.metadata.uid = None;
        assert_eq!(
            owner_ref(&cd),
            Err(DeriveError::MissingUid("test-resource".into()))
        );
    }
}

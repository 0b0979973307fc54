use minijinja::context;
use wadlgen_core::config::ClientConfig;
use wadlgen_core::error::GeneratorError;
use wadlgen_core::ir::IrRecord;

use super::constructor::emit_constructor;
use super::render;

/// Emit the client model of a record: a banner listing its paths, the bare constructor,
/// a model bound to the canonical path, and one collection per collection endpoint.
///
/// Returns `None` for a record no path reaches.
pub fn emit_model(record: &IrRecord, client: &ClientConfig) -> Result<Option<String>, GeneratorError> {
    let Some(model) = record.model.as_ref() else {
        return Ok(None);
    };

    let constructor = emit_constructor(record, false)?;
    let params: Vec<&str> = record
        .constructor
        .iter()
        .flat_map(|ctor| ctor.fields.iter().map(|f| f.param.as_str()))
        .collect();

    let (list_type, collections) = match &record.collection {
        Some(collection) => (
            collection.list_name().original.clone(),
            collection.endpoints.clone(),
        ),
        None => (String::new(), Vec::new()),
    };

    let content = render(
        "model.j2",
        include_str!("../../templates/model.j2"),
        context! {
            name => record.name.camel_case.clone(),
            type_name => record.name.original.clone(),
            paths => model.paths.clone(),
            constructor => constructor,
            params => params.join(", "),
            url => model.url.clone(),
            model_base => client.model_base.clone(),
            collection_base => client.collection_base.clone(),
            accessors => model.accessors.clone(),
            list_type => list_type,
            collections => collections,
        },
    )?;
    Ok(Some(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wadlgen_core::ir::{
        IrAccessor, IrCollection, IrConstructor, IrField, IrModel, IrPathMethods,
    };
    use wadlgen_core::transform::name_normalizer::normalize_name;
    use wadlgen_core::transform::path_uniquifier::CollectionEndpoint;

    fn record() -> IrRecord {
        let name = normalize_name("plcm-user");
        IrRecord {
            name,
            source_dir: "users".to_string(),
            constructor: Some(IrConstructor {
                fields: vec![IrField {
                    name: normalize_name("user-id"),
                    param: "userIdParam".to_string(),
                    type_label: "string".to_string(),
                    doc: None,
                }],
                base: None,
                requires: vec![],
                memberless_requires: vec![],
            }),
            model: Some(IrModel {
                url: "/api/users".to_string(),
                paths: vec![
                    IrPathMethods {
                        path: "/api/users".to_string(),
                        methods: vec!["POST".to_string()],
                    },
                    IrPathMethods {
                        path: "/api/users/{id}".to_string(),
                        methods: vec!["GET".to_string(), "PUT".to_string()],
                    },
                ],
                accessors: vec![IrAccessor {
                    member: "user-id".to_string(),
                    attr_name: "userIdAttrName".to_string(),
                    getter: "getUserId".to_string(),
                    setter: "setUserId".to_string(),
                }],
            }),
            collection: None,
        }
    }

    #[test]
    fn test_model() {
        let out = emit_model(&record(), &ClientConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(
            out,
            r#"/*
 * Client code generated by wadlgen.
 * The paths and methods for the type "plcmUser" are:
 *   /api/users supports methods: POST
 *   /api/users/{id} supports methods: GET, PUT
 */
var plcmUser = function(userIdParam)
{
  this['user-id'] = userIdParam; // string
};

var plcmUserModel = function(attributes, options)
{
  _.extend(this, new PlcmModel());
  attributes = attributes ? _.clone(attributes) : {};
  options = options ? _.clone(options) : {};
  this.url = "/api/users";
  this.returnType = "plcm-user";
  this.payloadType = plcmUser;
  this.setData = function(userIdParam)
  {
    var obj = {};
    this.payloadType.apply(obj, arguments);
    this.set(obj);
  };

  this.userIdAttrName = "user-id";

  this.setUserId = function(val) { this.set(this.userIdAttrName, val); };

  this.getUserId = function() { return this.get(this.userIdAttrName); };

  this.set(this.parse(attributes, options), options);
};
"#
        );
    }

    #[test]
    fn test_model_with_collections() {
        let mut user = record();
        let mut list = record();
        list.name = normalize_name("plcm-user-list");
        list.model = None;
        user.collection = Some(IrCollection {
            list: Box::new(list),
            endpoints: vec![
                CollectionEndpoint {
                    suffix: String::new(),
                    path: "/api/users".to_string(),
                },
                CollectionEndpoint {
                    suffix: "GroupsUsers".to_string(),
                    path: "/api/groups/{id}/users".to_string(),
                },
            ],
        });
        let client = ClientConfig {
            model_base: "BaseModel".to_string(),
            collection_base: "BaseCollection".to_string(),
        };

        let out = emit_model(&user, &client).unwrap().unwrap();
        assert!(out.contains("  _.extend(this, new BaseModel());\n"));
        assert!(out.ends_with(
            r#"
var plcmUserGroupsUsersCollection = function(attributes, options)
{
  _.extend(this, new BaseCollection());
  this.url = "/api/groups/{id}/users";
  this.returnType = "plcm-user-list";
  this.model = plcmUserModel;
  attributes = attributes ? _.clone(attributes) : {};
  options = options ? _.clone(options) : {};
  this.set(this.parse(attributes, options), options);
};
"#
        ));
        assert!(out.contains("var plcmUserCollection = function(attributes, options)\n"));
        assert!(out.contains("  this.url = \"/api/users\";\n  this.returnType = \"plcm-user-list\";\n"));
    }

    #[test]
    fn test_memberless_model_has_no_payload() {
        let mut user = record();
        user.constructor = None;
        user.model.as_mut().unwrap().accessors.clear();
        let out = emit_model(&user, &ClientConfig::default()).unwrap().unwrap();
        assert!(!out.contains("payloadType"));
        assert!(out.contains(" */\nvar plcmUserModel = function(attributes, options)\n"));
    }

    #[test]
    fn test_unreachable_record_has_no_model() {
        let mut user = record();
        user.model = None;
        assert!(emit_model(&user, &ClientConfig::default()).unwrap().is_none());
    }
}

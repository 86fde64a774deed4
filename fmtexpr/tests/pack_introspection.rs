use fmtexpr::prelude::*;

fn int_primitive() -> Primitive {
    declare_primitive(Descriptor::field("int", IntegerField::I32))
}

#[test]
fn unbound_operand_is_unsatisfied() {
    let a = declare_variable("a");
    let c = declare_variable("c");
    let pack = pack![a.bind(1), &a + &c];

    let report = pack.dependency_report();
    assert_eq!(
        report.all_dependencies(),
        &[a.ident().clone(), c.ident().clone()]
    );
    assert_eq!(report.bound_variables(), &[a.ident().clone()]);
    assert_eq!(report.unsatisfied_dependencies(), &[c.ident().clone()]);
    assert!(report.duplicate_bindings().is_empty());
    assert!(!report.is_consistent());

    let errors = pack.validate().expect_err("`c` is never bound");
    assert_eq!(
        errors.as_slice(),
        &[ValidationError::MissingBinding {
            name: c.ident().clone()
        }]
    );
}

#[test]
fn typed_variable_bound_twice_is_duplicated() {
    let int = int_primitive();
    let b = declare_typed_variable("b", &int);
    let pack = pack![b.bind(2), b.bind(5)];

    let report = pack.dependency_report();
    assert_eq!(report.bound_variables(), &[b.ident().clone()]);
    assert_eq!(report.duplicate_bindings(), &[b.ident().clone()]);
    assert!(report.unsatisfied_dependencies().is_empty());

    let errors = pack.validate().expect_err("`b` is bound twice");
    assert_eq!(errors.len(), 1);
    assert!(errors.iter().all(ValidationError::is_duplicate_binding));
    assert_eq!(errors.as_slice()[0].name(), b.ident());
}

#[test]
fn primitive_and_typed_values_are_consistent() {
    let int = int_primitive();
    let d = declare_typed_variable("d", &int);
    let pack = pack![int.bind(4), d.bind(4)];

    let report = pack.validate().expect("pack should be self-consistent");
    assert!(report.unsatisfied_dependencies().is_empty());
    assert!(report.duplicate_bindings().is_empty());
    assert_eq!(report.bound_variables(), &[d.ident().clone()]);
}

#[test]
fn every_extra_binding_is_reported() {
    let a = declare_variable("a");
    let b = declare_variable("b");
    let pack = pack![a.bind(1), b.bind(1), a.bind(2), a.bind(3), b.bind(4)];

    let report = pack.dependency_report();
    assert_eq!(report.bound_variables(), &[a.ident().clone(), b.ident().clone()]);
    assert_eq!(
        report.duplicate_bindings(),
        &[a.ident().clone(), a.ident().clone(), b.ident().clone()],
        "duplicates keep one entry per extra occurrence, in pack order"
    );

    let errors = pack.validate().unwrap_err();
    assert_eq!(errors.len(), 3);
}

#[test]
fn duplicates_are_reported_before_missing_bindings() {
    let a = declare_variable("a");
    let x = declare_variable("x");
    let y = declare_variable("y");
    let pack = pack![&x * &y, a.bind(1), a.bind(1)];

    let errors: Vec<_> = pack.validate().unwrap_err().into_iter().collect();
    assert_eq!(
        errors,
        vec![
            ValidationError::DuplicateBinding {
                name: a.ident().clone()
            },
            ValidationError::MissingBinding {
                name: x.ident().clone()
            },
            ValidationError::MissingBinding {
                name: y.ident().clone()
            },
        ]
    );
}

#[test]
fn same_name_declarations_are_distinct() {
    let first = declare_variable("a");
    let second = declare_variable("a");
    assert_ne!(first.ident(), second.ident());

    let pack = pack![first.bind(1), second.bind(2)];
    assert!(
        pack.validate().is_ok(),
        "identity is the uuid, not the declared name"
    );
}

#[test]
fn descriptor_dependencies_propagate() {
    let len = declare_variable("len");
    let text = FieldDescriptor::new("body", FieldType::Text).depends_on(len.ident());
    let body = declare_typed_variable("body", text);

    let pack = pack![body.bind("hello")];
    assert_eq!(
        pack.dependency_report().unsatisfied_dependencies(),
        &[len.ident().clone()]
    );

    let pack = pack![body.bind("hello"), len.bind(5)];
    assert!(pack.validate().is_ok());
}

#[test]
fn bound_but_unreferenced_variables_are_fine() {
    let a = declare_variable("a");
    let b = declare_variable("b");
    let pack = pack![b.bind(7), a.bind(1), &a + 2];

    let report = pack.dependency_report();
    assert_eq!(report.all_dependencies(), &[a.ident().clone()]);
    assert!(report.unsatisfied_dependencies().is_empty());
    assert_eq!(report.satisfied_dependencies().as_slice(), &[a.ident().clone()]);
}

#[test]
fn empty_pack_is_consistent() {
    let pack = pack![];
    assert!(pack.is_empty());
    let report = pack.validate().expect("nothing to violate");
    assert!(report.all_dependencies().is_empty());
    assert_eq!(pack.element_reports().count(), 0);
}

#[test]
fn nested_expressions_flatten_dependencies() {
    let a = declare_variable("a");
    let b = declare_variable("b");
    let c = declare_variable("c");
    let expr = (&a + &b) * (&b - &c);

    assert_eq!(
        expr.dependencies(),
        &[a.ident().clone(), b.ident().clone(), c.ident().clone()]
    );
}

#[test]
fn element_reports_follow_pack_order() {
    let int = int_primitive();
    let a = declare_variable("a");
    let c = declare_variable("c");
    let d = declare_typed_variable("d", &int);
    let pack = pack![a.bind(1), &a + &c, d.clone(), int.clone(), 42];
    let labels = LabelStyle::Name;

    let reports: Vec<_> = pack.element_reports().collect();
    assert_eq!(reports.len(), pack.len());
    assert_eq!(
        reports.iter().map(|r| r.index).collect::<Vec<_>>(),
        vec![0, 1, 2, 3, 4]
    );
    assert_eq!(
        reports.iter().map(ElementReport::kind).collect::<Vec<_>>(),
        vec![
            EntityKind::Value,
            EntityKind::Expression,
            EntityKind::Variable,
            EntityKind::Primitive,
            EntityKind::Literal,
        ]
    );

    let value = &reports[0];
    assert_eq!(value.binding(), Some(a.ident()));
    assert_eq!(value.binding_label(&labels), "a");
    assert_eq!(value.declared_type(&labels), "value<a, unspecified, integer>");
    assert_eq!(value.payload().to_string(), "1 (integer)");

    let expr = &reports[1];
    assert_eq!(expr.binding_label(&labels), "none");
    assert_eq!(expr.dependencies().len(), 2);
    assert_eq!(expr.descriptor_label(&labels), "none");
    assert_eq!(
        expr.declared_type(&labels),
        "expression<+, variable, variable>"
    );
    assert_eq!(expr.payload(), PayloadSummary::UnevaluatedExpression);
    assert_eq!(expr.payload().to_string(), "(unevaluated expression)");

    let typed = &reports[2];
    assert_eq!(typed.declared_type(&labels), "typed_variable<d, int: i32>");
    assert_eq!(typed.payload().to_string(), "(unevaluated statement)");
    assert_eq!(typed.descriptor(), Some(int.descriptor()));

    let primitive = &reports[3];
    assert_eq!(primitive.declared_type(&labels), "primitive<int: i32>");
    assert_eq!(primitive.binding(), None);

    let literal = &reports[4];
    assert_eq!(literal.declared_type(&labels), "literal<integer>");
    assert_eq!(literal.payload(), PayloadSummary::Literal(&Payload::Integer(42)));
}

#[test]
fn element_reports_are_restartable() {
    let a = declare_variable("a");
    let pack = pack![a.bind(1), a.clone()];

    let first: Vec<_> = pack.element_reports().collect();
    let second: Vec<_> = pack.element_reports().collect();
    assert_eq!(first, second);
}

#[test]
fn qualified_labels_include_uuid_prefix() {
    let a = declare_variable("a");
    let pack = pack![a.bind(1)];
    let report = pack.element_reports().next().unwrap();

    let label = report.binding_label(&LabelStyle::Qualified);
    let uuid = a.ident().uuid().simple().to_string();
    assert_eq!(label, format!("a@{}", &uuid[..8]));
}

#[test]
fn pack_from_iterator_preserves_order() {
    let vars: Vec<_> = ["x", "y", "z"].into_iter().map(declare_variable).collect();
    let pack: Pack = vars.iter().map(|v| v.bind(0)).collect();

    let bound: Vec<_> = pack.iter().filter_map(|e| e.binding().cloned()).collect();
    let expected: Vec<_> = vars.iter().map(|v| v.ident().clone()).collect();
    assert_eq!(bound, expected);
}

#[test]
fn literal_wrapping_an_entity_carries_its_dependencies() {
    let a = declare_variable("a");
    let c = declare_variable("c");
    let literal = Entity::from(Payload::from(Entity::from(&a + &c)));

    assert_eq!(literal.dependencies(), &[a.ident().clone(), c.ident().clone()]);
    assert_eq!(literal.binding(), None);
    assert_eq!(
        literal.dependencies(),
        literal.apply(&Payload::Integer(0)).unwrap().dependencies(),
        "applying a literal must not change what it depends on"
    );

    let pack = Pack::new([literal.clone()]);
    let errors = pack.validate().expect_err("neither `a` nor `c` is bound");
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(ValidationError::is_missing_binding));

    let pack = pack![literal, a.bind(1), c.bind(2)];
    assert!(pack.validate().is_ok());
}

#[test]
fn plain_literals_have_no_dependencies() {
    let literal = Entity::from("text");
    assert!(literal.dependencies().is_empty());
    assert!(literal.descriptor().is_none());
}

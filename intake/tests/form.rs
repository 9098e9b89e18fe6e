use intake::{Bind, Decoder, DecodeConfig, ErrorKind, FormInput, RawValue};
use intake_testhelpers::test;

#[derive(Bind, serde::Deserialize, Debug, Default, PartialEq)]
struct Person {
    name: String,
    age: i64,
}

#[test]
fn url_encoded_body_with_derived_keys() {
    let mut person = Person::default();
    intake::from_body(
        "application/x-www-form-urlencoded",
        "name=Ada&age=23".into(),
        &mut person,
    )
    .unwrap();
    assert_eq!(
        person,
        Person {
            name: "Ada".into(),
            age: 23
        }
    );
}

#[test]
fn query_lists_from_repeated_keys() {
    #[derive(Bind, Debug, Default, PartialEq)]
    struct Lists {
        #[bind(query = "ints")]
        ints: Vec<i32>,
        #[bind(query = "strings")]
        strings: Vec<String>,
    }

    let mut lists = Lists::default();
    intake::from_query_str(
        "ints=1&ints=2&ints=3&strings=a&strings=b&strings=c",
        &mut lists,
    )
    .unwrap();
    assert_eq!(lists.ints, [1, 2, 3]);
    assert_eq!(lists.strings, ["a", "b", "c"]);
}

#[test]
fn comma_joined_and_repeated_values_agree() {
    #[derive(Bind, Debug, Default, PartialEq)]
    struct Ints {
        ints: Vec<i32>,
    }

    let mut repeated = Ints::default();
    intake::from_form(&FormInput::parse("ints=1&ints=2&ints=3"), &mut repeated).unwrap();

    let mut joined = Ints::default();
    intake::from_form(&FormInput::parse("ints=1,%202,%203"), &mut joined).unwrap();

    assert_eq!(repeated.ints, [1, 2, 3]);
    assert_eq!(repeated, joined);
}

#[test]
fn format_tag_beats_fallback_tag_beats_name() {
    #[derive(Bind, Debug, Default)]
    #[allow(non_snake_case)]
    struct Tagged {
        #[bind(form = "from_form", json = "from_json")]
        both: String,
        #[bind(json = "only_json")]
        fallback: String,
        PlainName: String,
    }

    let input = FormInput::parse(
        "from_form=form&from_json=json&both=name&only_json=fallback&plain_name=plain",
    );
    let mut tagged = Tagged::default();
    intake::from_form(&input, &mut tagged).unwrap();
    assert_eq!(tagged.both, "form");
    assert_eq!(tagged.fallback, "fallback");
    assert_eq!(tagged.PlainName, "plain");
}

#[test]
fn query_and_form_tags_are_separate() {
    #[derive(Bind, Debug, Default)]
    struct Search {
        #[bind(form = "term", query = "q")]
        term: String,
    }

    let input = FormInput::parse("q=from-query&term=from-form");

    let mut search = Search::default();
    intake::from_query(&input, &mut search).unwrap();
    assert_eq!(search.term, "from-query");

    let mut search = Search::default();
    intake::from_form(&input, &mut search).unwrap();
    assert_eq!(search.term, "from-form");
}

#[test]
fn required_fields_must_be_present_and_non_empty() {
    #[derive(Bind, Debug, Default)]
    struct Signup {
        #[bind(form = "email,required")]
        email: String,
        #[bind(required)]
        password: String,
        nickname: String,
    }

    let mut signup = Signup::default();
    let err = intake::from_form(&FormInput::parse("password=x"), &mut signup).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequiredFieldMissing);
    assert_eq!(err.field(), Some("email"));
    insta::assert_snapshot!(err.to_string(), @"required field missing for field `email`");

    let err =
        intake::from_form(&FormInput::parse("email=&password=x"), &mut signup).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequiredFieldMissing);
    assert_eq!(err.field(), Some("email"));

    let err = intake::from_form(&FormInput::parse("email=a%40b.c"), &mut signup).unwrap_err();
    assert_eq!(err.field(), Some("password"));
    // Fields before the failing one stay decoded.
    assert_eq!(signup.email, "a@b.c");

    let mut signup = Signup::default();
    intake::from_form(&FormInput::parse("email=a%40b.c&password=x"), &mut signup).unwrap();
    assert_eq!(signup.nickname, "");
}

#[test]
fn parse_failures_name_the_field() {
    let mut person = Person::default();
    let err = intake::from_form(&FormInput::parse("name=Ada&age=old"), &mut person).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailure);
    assert_eq!(err.field(), Some("age"));
    insta::assert_snapshot!(err.to_string(), @"parse failure for field `age`: invalid digit found in string");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn integer_overflow_is_a_parse_failure() {
    #[derive(Bind, Default)]
    struct Small {
        n: u8,
    }

    let mut small = Small::default();
    let err = intake::from_form(&FormInput::parse("n=300"), &mut small).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailure);
    insta::assert_snapshot!(err.to_string(), @"parse failure for field `n`: number too large to fit in target type");
}

#[test]
fn checkbox_booleans() {
    #[derive(Bind, Default)]
    struct Flags {
        a: bool,
        b: bool,
        c: bool,
        d: bool,
    }

    let mut flags = Flags::default();
    intake::from_form(&FormInput::parse("a=on&b=true&c=1&d=off"), &mut flags).unwrap();
    assert!(flags.a && flags.b && flags.c && !flags.d);

    let err = intake::from_form(&FormInput::parse("a=yes"), &mut flags).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailure);
    insta::assert_snapshot!(err.to_string(), @"parse failure for field `a`: `yes` is not a valid boolean");
}

#[test]
fn optional_fields_allocate_only_when_present() {
    #[derive(Bind, Debug, Default)]
    struct Filters {
        limit: Option<u32>,
        cursor: Option<String>,
        ids: Option<Vec<u64>>,
    }

    let mut filters = Filters::default();
    intake::from_form(&FormInput::parse("limit=10&ids=4,5"), &mut filters).unwrap();
    assert_eq!(filters.limit, Some(10));
    assert_eq!(filters.cursor, None);
    assert_eq!(filters.ids, Some(vec![4, 5]));
}

#[test]
fn nested_records_read_the_same_input() {
    #[derive(Bind, Debug, Default)]
    struct Address {
        city: String,
        #[bind(form = "zip")]
        postal_code: String,
    }

    #[derive(Bind, Debug, Default)]
    struct Order {
        item: String,
        address: Address,
    }

    let mut order = Order::default();
    let input = FormInput::parse("item=book&city=Lyon&zip=69001&address=ignored");
    intake::from_form(&input, &mut order).unwrap();
    assert_eq!(order.item, "book");
    assert_eq!(order.address.city, "Lyon");
    assert_eq!(order.address.postal_code, "69001");
}

#[test]
fn errors_in_nested_records_carry_the_leaf_key() {
    #[derive(Bind, Debug, Default)]
    struct Inner {
        #[bind(form = "count,required")]
        count: u16,
    }

    #[derive(Bind, Debug, Default)]
    struct Outer {
        inner: Inner,
    }

    let mut outer = Outer::default();
    let err = intake::from_form(&FormInput::new(), &mut outer).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequiredFieldMissing);
    assert_eq!(err.field(), Some("count"));
}

#[derive(Bind, Debug, Default, PartialEq)]
struct Address {
    #[bind(form = "city,required")]
    city: String,
    #[bind(form = "zip")]
    postal_code: String,
}

#[test]
fn optional_nested_records_stay_none_without_their_keys() {
    #[derive(Bind, Debug, Default)]
    struct Order {
        item: String,
        shipping: Option<Address>,
    }

    let mut order = Order::default();
    intake::from_form(&FormInput::parse("item=book&shipping=x&city="), &mut order).unwrap();
    assert_eq!(order.item, "book");
    assert_eq!(order.shipping, None);

    let mut order = Order::default();
    intake::from_form(&FormInput::parse("item=book&city=Lyon"), &mut order).unwrap();
    assert_eq!(
        order.shipping,
        Some(Address {
            city: "Lyon".into(),
            postal_code: String::new(),
        })
    );
}

#[test]
fn required_fields_inside_wrapped_nested_records() {
    #[derive(Bind, Debug, Default)]
    struct Order {
        shipping: Option<Address>,
        billing: Box<Address>,
    }

    // One key of the nested record is enough to enforce the rest.
    let mut order = Order::default();
    let err = intake::from_form(&FormInput::parse("zip=69001"), &mut order).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequiredFieldMissing);
    assert_eq!(err.field(), Some("city"));

    // Entirely absent, neither wrapper is descended into.
    let mut order = Order::default();
    intake::from_form(&FormInput::parse("other=1"), &mut order).unwrap();
    assert_eq!(order.shipping, None);
    assert_eq!(*order.billing, Address::default());
}

#[test]
fn required_nested_record_needs_one_of_its_keys() {
    #[derive(Bind, Debug, Default)]
    struct Order {
        item: String,
        #[bind(required)]
        address: Address,
        #[bind(form = "gift,required")]
        gift_address: Option<Address>,
    }

    let mut order = Order::default();
    let err = intake::from_form(&FormInput::parse("item=book"), &mut order).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequiredFieldMissing);
    assert_eq!(err.field(), Some("address"));
    insta::assert_snapshot!(err.to_string(), @"required field missing for field `address`");

    // The inner keys are shared, so both records bind from them.
    let mut order = Order::default();
    intake::from_form(&FormInput::parse("item=book&city=Lyon"), &mut order).unwrap();
    assert_eq!(order.address.city, "Lyon");
    assert_eq!(order.gift_address.map(|a| a.city).as_deref(), Some("Lyon"));
}

#[test]
fn required_list_with_only_a_blank_value_is_missing() {
    #[derive(Bind, Debug, Default)]
    struct Ints {
        #[bind(required)]
        ints: Vec<i32>,
    }

    let mut ints = Ints::default();
    let err = intake::from_form(&FormInput::parse("ints="), &mut ints).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequiredFieldMissing);
    assert_eq!(err.field(), Some("ints"));

    let err = intake::from_query_str("ints=", &mut ints).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequiredFieldMissing);
    assert!(ints.ints.is_empty());
}

#[test]
fn skipped_fields_are_never_touched() {
    #[derive(Bind, Debug, Default)]
    struct Account {
        name: String,
        #[bind(skip)]
        is_admin: bool,
    }

    let mut account = Account::default();
    intake::from_form(&FormInput::parse("name=eve&is_admin=true"), &mut account).unwrap();
    assert_eq!(account.name, "eve");
    assert!(!account.is_admin);
}

#[test]
fn maps_are_unsupported_when_present() {
    #[derive(Bind, Debug, Default)]
    struct WithMap {
        name: String,
        meta: std::collections::HashMap<String, String>,
    }

    let mut value = WithMap::default();
    intake::from_form(&FormInput::parse("name=x"), &mut value).unwrap();
    assert_eq!(value.name, "x");

    let err = intake::from_form(&FormInput::parse("meta=a"), &mut value).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFieldType);
    assert_eq!(err.field(), Some("meta"));
}

#[test]
fn temporal_fields_use_the_configured_zone() {
    #[derive(Bind, Debug, Default)]
    struct Meeting {
        starts: Option<jiff::Zoned>,
        day: jiff::civil::Date,
        at: Option<jiff::Timestamp>,
    }

    let config = DecodeConfig::default()
        .with_time_zone_name("Europe/Berlin")
        .unwrap();
    let decoder = Decoder::new(config);

    let mut meeting = Meeting::default();
    let input = FormInput::parse("starts=2024-06-01T09:30&day=2024-06-02&at=2024-06-01T07:30:00Z");
    decoder.decode_form(&input, &mut meeting).unwrap();

    let starts = meeting.starts.unwrap();
    assert_eq!(starts.time_zone().iana_name(), Some("Europe/Berlin"));
    assert_eq!(starts.timestamp(), meeting.at.unwrap());
    assert_eq!(meeting.day, jiff::civil::date(2024, 6, 2));

    let err = decoder
        .decode_form(&FormInput::parse("day=June 2nd"), &mut Meeting::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailure);
    insta::assert_snapshot!(err.to_string(), @"parse failure for field `day`: `June 2nd` does not match any supported time layout");
}

#[test]
fn first_of_many_values_for_scalars() {
    let mut input = FormInput::new();
    input.insert("age", RawValue::Many(vec!["41".into(), "42".into()]));
    let mut person = Person::default();
    intake::from_form(&input, &mut person).unwrap();
    assert_eq!(person.age, 41);
}

#[test]
fn other_tags_through_decode_with_tag() {
    #[derive(Bind, Debug, Default)]
    struct Route {
        #[bind(param = "id,required")]
        id: u64,
        #[bind(param = "slug")]
        slug: String,
    }

    let input: FormInput = [("id", "17"), ("slug", "hello-world")].into_iter().collect();
    let mut route = Route::default();
    Decoder::default()
        .decode_with_tag("param", &input, &mut route)
        .unwrap();
    assert_eq!(route.id, 17);
    assert_eq!(route.slug, "hello-world");
}

#[test]
fn describe_reports_resolved_keys() {
    #[derive(Bind, Debug, Default)]
    struct Profile {
        #[bind(form = "", json = "display")]
        display_name: String,
        #[bind(json = "Avatar,required")]
        avatar_url: String,
        tags: Vec<String>,
    }

    let descriptor =
        intake::describe(&mut Profile::default(), &DecodeConfig::default()).unwrap();
    let keys: Vec<_> = descriptor
        .fields
        .iter()
        .map(|f| (&*f.external_key, f.required))
        .collect();
    assert_eq!(keys, [("", false), ("Avatar", true), ("tags", false)]);
    assert!(descriptor.field("Avatar").is_some());
}

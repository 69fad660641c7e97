//! Deterministic demo dataset.
//!
//! A small slice of an employees/salaries schema: the local node holds the
//! employee relation, the remote node the salary relation, joined on
//! `emp_no`. The data is fixed so every run of the demo and the sweep sees
//! the same key universe.

use chrono::NaiveDate;
use shared_types::{Employee, Gender, Salary};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn employee(
    emp_no: u32,
    birth: (i32, u32, u32),
    first_name: &str,
    last_name: &str,
    gender: Gender,
    hire: (i32, u32, u32),
) -> Employee {
    Employee {
        emp_no: emp_no.to_string(),
        birth_date: date(birth.0, birth.1, birth.2),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        gender,
        hire_date: date(hire.0, hire.1, hire.2),
    }
}

/// The local node's employee relation.
pub fn employees() -> Vec<Employee> {
    vec![
        employee(10001, (1953, 9, 2), "Georgi", "Facello", Gender::M, (1986, 6, 26)),
        employee(10006, (1953, 4, 20), "Anneke", "Preusig", Gender::F, (1989, 6, 2)),
        employee(10011, (1953, 11, 7), "Mary", "Sluis", Gender::F, (1990, 1, 22)),
        employee(10012, (1960, 10, 4), "Patricio", "Bridgland", Gender::M, (1992, 12, 18)),
        employee(10017, (1958, 7, 6), "Cristinel", "Bouloucos", Gender::F, (1993, 8, 3)),
        employee(10024, (1958, 9, 5), "Mary", "Piveteau", Gender::F, (1989, 12, 27)),
        employee(10031, (1959, 1, 27), "Karsten", "Joslin", Gender::M, (1991, 9, 1)),
        employee(10039, (1959, 10, 1), "Alejandro", "Brender", Gender::M, (1988, 1, 19)),
        employee(10043, (1960, 9, 19), "Yishay", "Tzvieli", Gender::M, (1990, 10, 20)),
        employee(10052, (1961, 2, 26), "Mary", "Ertl", Gender::M, (1992, 2, 13)),
        employee(10057, (1954, 5, 30), "Ebbe", "Callaway", Gender::F, (1992, 1, 15)),
        employee(10066, (1952, 11, 13), "Kwee", "Schusler", Gender::M, (1986, 2, 26)),
        employee(10073, (1954, 2, 23), "Shir", "McClurg", Gender::M, (1991, 12, 1)),
        employee(10082, (1963, 9, 9), "Parviz", "Lortz", Gender::M, (1990, 1, 3)),
        employee(10089, (1963, 3, 21), "Mary", "Dhanwada", Gender::F, (1986, 8, 12)),
        employee(10098, (1961, 9, 23), "Sreekrishna", "Servieres", Gender::F, (1985, 5, 13)),
    ]
}

fn salary(emp_no: u32, amount: i64, from: (i32, u32, u32), to: (i32, u32, u32)) -> Salary {
    Salary {
        emp_no: emp_no.to_string(),
        amount,
        from_date: date(from.0, from.1, from.2),
        to_date: date(to.0, to.1, to.2),
    }
}

/// The remote node's salary relation. A wider key universe than the
/// employee relation, so a shipped filter has room to false-positive.
pub fn salaries() -> Vec<Salary> {
    vec![
        salary(10001, 88_958, (2002, 6, 22), (9999, 1, 1)),
        salary(10002, 72_527, (2001, 8, 2), (9999, 1, 1)),
        salary(10004, 74_057, (2001, 11, 27), (9999, 1, 1)),
        salary(10006, 59_755, (2001, 8, 2), (9999, 1, 1)),
        salary(10009, 94_409, (2002, 2, 14), (9999, 1, 1)),
        salary(10011, 25_828, (1990, 1, 22), (1996, 11, 9)),
        salary(10012, 54_423, (2000, 12, 18), (9999, 1, 1)),
        salary(10016, 77_935, (1998, 2, 11), (1999, 2, 11)),
        salary(10017, 99_651, (2001, 8, 3), (9999, 1, 1)),
        salary(10024, 96_646, (2001, 11, 26), (9999, 1, 1)),
        salary(10031, 54_545, (2001, 9, 1), (9999, 1, 1)),
        salary(10035, 41_538, (2000, 1, 1), (2001, 1, 1)),
        salary(10039, 63_918, (2002, 1, 19), (9999, 1, 1)),
        salary(10043, 64_054, (2001, 10, 20), (9999, 1, 1)),
        salary(10048, 46_671, (1998, 1, 1), (1999, 1, 2)),
        salary(10052, 81_097, (2002, 2, 12), (9999, 1, 1)),
        salary(10057, 62_716, (2001, 1, 14), (9999, 1, 1)),
        salary(10061, 58_913, (2001, 10, 3), (9999, 1, 1)),
        salary(10066, 82_507, (2001, 2, 26), (9999, 1, 1)),
        salary(10073, 33_462, (1998, 2, 22), (1998, 8, 6)),
        salary(10077, 46_595, (2001, 12, 6), (9999, 1, 1)),
        salary(10082, 48_935, (1990, 1, 3), (1990, 12, 27)),
        salary(10089, 67_102, (2001, 2, 10), (9999, 1, 1)),
        salary(10094, 72_666, (2002, 5, 5), (9999, 1, 1)),
        salary(10098, 44_570, (2001, 5, 13), (9999, 1, 1)),
        salary(10099, 98_538, (2002, 11, 26), (9999, 1, 1)),
    ]
}

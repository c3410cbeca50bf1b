//! Source templates for new libraries and apps.
//!
//! Each function renders one file from the target name alone, so the output
//! is fully determined by its arguments.
//!
//! ## Library layout
//!
//! - `src/<lib>/<lib>.cpp` and `src/<lib>/CMakeLists.txt`
//! - `include/<lib>/<lib>.h`
//! - `tests/<lib>/test_<lib>.cpp` and `tests/<lib>/CMakeLists.txt`
//!
//! ## App layout
//!
//! - `apps/<app>/<app>.cpp` and `apps/<app>/CMakeLists.txt`

pub fn lib_source(lib: &str) -> String {
    format!(
        r#"#include "{lib}/{lib}.h"

namespace {lib} {{
bool functionNameF(const Real realV)
{{
    return realV > 0.0f;
}}
}} // namespace {lib}
"#
    )
}

pub fn lib_header(lib: &str) -> String {
    format!(
        r#"#pragma once

namespace {lib} {{
/// @brief Example function
///
/// @details This function is an example of a function. It returns true if a is
/// greater than 0, false otherwise.
///
/// @param aV
/// @return true
/// @return false

using Real = float;

bool functionNameF(const Real realV);
}} // namespace {lib}
"#
    )
}

pub fn lib_test(lib: &str) -> String {
    format!(
        r#"#include <catch2/catch_test_macros.hpp>
#include <{lib}/{lib}.h>

TEST_CASE("{lib}::functionName") {{
    REQUIRE({lib}::functionNameF(1.0f));
    REQUIRE_FALSE({lib}::functionNameF(-1.0f));
}}
"#
    )
}

pub fn lib_cmake(lib: &str) -> String {
    format!(
        r#"AUX_SOURCE_DIRECTORY(. DIR_LIB_SRCS)
AUX_SOURCE_DIRECTORY(${{PROJECT_SOURCE_DIR}}/include/{lib} DIR_LIB_HEADERS)
add_library({lib} ${{DIR_LIB_SRCS}} ${{DIR_LIB_HEADERS}})
install(TARGETS {lib} ARCHIVE DESTINATION lib COMPONENT {lib}_libs)
install(FILES ${{DIR_LIB_HEADERS}} DESTINATION include COMPONENT {lib}_headers)

target_include_directories({lib} PUBLIC ${{PROJECT_SOURCE_DIR}}/include)

target_compile_features({lib} PUBLIC cxx_std_11)

source_group(
  TREE "${{PROJECT_SOURCE_DIR}}/include"
  PREFIX "Header Files"
  FILES ${{DIR_LIB_HEADERS}})
"#
    )
}

pub fn lib_test_cmake(lib: &str) -> String {
    format!(
        r#"AUX_SOURCE_DIRECTORY(. DIR_LIB_TESTS)
add_executable(test_{lib} ${{DIR_LIB_TESTS}})

find_package(Catch2 3 REQUIRED)

target_compile_features(test_{lib} PRIVATE cxx_std_17)

target_link_libraries(test_{lib} PRIVATE {lib} Catch2::Catch2WithMain)

add_test(NAME test_{lib}test COMMAND test_{lib})
"#
    )
}

pub fn app_source(libs: &[String]) -> String {
    let includes: String = libs
        .iter()
        .map(|lib| format!("#include \"{lib}/{lib}.h\"\n"))
        .collect();
    format!(
        r#"{includes}
int main()
{{
    // App code here
    return 0;
}}
"#
    )
}

pub fn app_cmake(app: &str, libs: &[String]) -> String {
    let link = libs.join(" ");
    format!(
        r#"AUX_SOURCE_DIRECTORY(. DIR_LIB_SRCS)
add_executable({app} ${{DIR_LIB_SRCS}})
install(TARGETS {app} RUNTIME DESTINATION bin COMPONENT {app}_apps)

target_compile_features({app} PRIVATE cxx_std_17)

target_link_libraries({app} PRIVATE {link})
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lib_files_carry_the_name() {
        assert!(lib_source("mathutils").starts_with("#include \"mathutils/mathutils.h\""));
        assert!(lib_source("mathutils").contains("namespace mathutils {"));
        assert!(lib_header("mathutils").contains("} // namespace mathutils"));
        assert!(lib_test("mathutils").contains("REQUIRE(mathutils::functionNameF(1.0f));"));
    }

    #[test]
    fn test_lib_cmake_declares_target() {
        let cmake = lib_cmake("io");
        assert!(cmake.contains("add_library(io ${DIR_LIB_SRCS} ${DIR_LIB_HEADERS})"));
        assert!(cmake.contains("COMPONENT io_libs"));
        assert!(cmake.contains("COMPONENT io_headers"));
        assert!(cmake.contains("target_compile_features(io PUBLIC cxx_std_11)"));
        assert!(cmake.contains("${PROJECT_SOURCE_DIR}/include/io DIR_LIB_HEADERS"));
    }

    #[test]
    fn test_lib_test_cmake_links_catch2() {
        let cmake = lib_test_cmake("io");
        assert!(cmake.contains("add_executable(test_io ${DIR_LIB_TESTS})"));
        assert!(cmake.contains("target_link_libraries(test_io PRIVATE io Catch2::Catch2WithMain)"));
        assert!(cmake.contains("add_test(NAME test_iotest COMMAND test_io)"));
    }

    #[test]
    fn test_app_includes_every_lib() {
        let libs = vec!["a".to_string(), "b".to_string()];
        let source = app_source(&libs);
        assert!(source.starts_with("#include \"a/a.h\"\n#include \"b/b.h\"\n\nint main()"));
        let cmake = app_cmake("sim", &libs);
        assert!(cmake.contains("target_link_libraries(sim PRIVATE a b)"));
        assert!(cmake.contains("COMPONENT sim_apps"));
    }

    #[test]
    fn test_app_without_libs() {
        assert!(app_source(&[]).starts_with("\nint main()"));
    }
}
